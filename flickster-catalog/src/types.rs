//! Data model types for the movie store.
//!
//! `MovieRecord` is the typed view of one row in the `movie` table.
//! `ContentValues` is the untyped column map used for insert/update payloads
//! and for row snapshots handed back by queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contract::*;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Field '{field}' has the wrong type (expected {expected})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

// ── Field Values ────────────────────────────────────────────────────────────

/// A single column value, mirroring SQLite's storage classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Parse a loosely-typed token: integer, then float, else text.
    ///
    /// Used by front ends that take values from the command line.
    pub fn parse_loose(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("null") {
            FieldValue::Null
        } else if let Ok(v) = raw.parse::<i64>() {
            FieldValue::Integer(v)
        } else if let Ok(v) = raw.parse::<f64>() {
            FieldValue::Real(v)
        } else {
            FieldValue::Text(raw.to_string())
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Real(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Real(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Integer(v as i64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

// ── Content Values ──────────────────────────────────────────────────────────

/// Column name → value map for one row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentValues(BTreeMap<String, FieldValue>);

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(column.into(), value.into());
    }

    /// Builder-style `put`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.put(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.0.get(column)
    }

    pub fn remove(&mut self, column: &str) -> Option<FieldValue> {
        self.0.remove(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for ContentValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── Movie ───────────────────────────────────────────────────────────────────

/// One movie as fetched for a given day.
///
/// `popular` and `top_rated` are independent tags: a movie may appear in
/// both lists for the same date bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    /// Date bucket (see [`crate::date::nearest_day`]).
    pub date: i64,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub top_rated: bool,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub user_rating: f64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl MovieRecord {
    /// A minimal record; descriptive fields start empty.
    pub fn new(id: i64, date: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            date,
            popular: false,
            top_rated: false,
            popularity: 0.0,
            user_rating: 0.0,
            title: title.into(),
            original_title: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
        }
    }

    /// Full row for an insert. Every column is present so that a replace
    /// never leaves stale values behind.
    pub fn to_values(&self) -> ContentValues {
        ContentValues::new()
            .with(COLUMN_ID, self.id)
            .with(COLUMN_DATE, self.date)
            .with(COLUMN_POPULAR, self.popular)
            .with(COLUMN_TOP_RATED, self.top_rated)
            .with(COLUMN_POPULARITY, self.popularity)
            .with(COLUMN_USER_RATING, self.user_rating)
            .with(COLUMN_TITLE, self.title.as_str())
            .with(COLUMN_ORIGINAL_TITLE, self.original_title.clone())
            .with(COLUMN_OVERVIEW, self.overview.clone())
            .with(COLUMN_POSTER_PATH, self.poster_path.clone())
            .with(COLUMN_BACKDROP_PATH, self.backdrop_path.clone())
            .with(COLUMN_RELEASE_DATE, self.release_date.clone())
    }

    /// Read a record back from a complete row snapshot.
    pub fn from_values(values: &ContentValues) -> Result<Self, RecordError> {
        Ok(Self {
            id: int_field(values, COLUMN_ID)?,
            date: int_field(values, COLUMN_DATE)?,
            popular: int_field(values, COLUMN_POPULAR)? != 0,
            top_rated: int_field(values, COLUMN_TOP_RATED)? != 0,
            popularity: real_field(values, COLUMN_POPULARITY)?,
            user_rating: real_field(values, COLUMN_USER_RATING)?,
            title: text_field(values, COLUMN_TITLE)?
                .ok_or(RecordError::MissingField(COLUMN_TITLE))?,
            original_title: text_field(values, COLUMN_ORIGINAL_TITLE)?,
            overview: text_field(values, COLUMN_OVERVIEW)?,
            poster_path: text_field(values, COLUMN_POSTER_PATH)?,
            backdrop_path: text_field(values, COLUMN_BACKDROP_PATH)?,
            release_date: text_field(values, COLUMN_RELEASE_DATE)?,
        })
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn field<'a>(values: &'a ContentValues, name: &'static str) -> Result<&'a FieldValue, RecordError> {
    values.get(name).ok_or(RecordError::MissingField(name))
}

fn int_field(values: &ContentValues, name: &'static str) -> Result<i64, RecordError> {
    field(values, name)?.as_i64().ok_or(RecordError::WrongType {
        field: name,
        expected: "integer",
    })
}

fn real_field(values: &ContentValues, name: &'static str) -> Result<f64, RecordError> {
    field(values, name)?.as_f64().ok_or(RecordError::WrongType {
        field: name,
        expected: "number",
    })
}

/// Optional text column. A missing column is an error; a NULL value is `None`.
fn text_field(values: &ContentValues, name: &'static str) -> Result<Option<String>, RecordError> {
    match field(values, name)? {
        FieldValue::Null => Ok(None),
        FieldValue::Text(s) => Ok(Some(s.clone())),
        _ => Err(RecordError::WrongType {
            field: name,
            expected: "text",
        }),
    }
}
