//! Storage engine primitives over a SQLite connection.
//!
//! The free functions take `&Connection` so the same code runs against a
//! plain connection or inside a transaction (which derefs to one).
//! `MovieStore` owns the single connection the provider talks to.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use flickster_catalog::{ContentValues, FieldValue, MovieRecord, RecordError};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, params_from_iter};
use thiserror::Error;

use crate::schema::{self, SchemaError};
use crate::uri::MovieUri;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid column name: '{0}'")]
    InvalidColumn(String),
    #[error("Empty values for {operation} on table '{table}'")]
    EmptyValues {
        operation: &'static str,
        table: String,
    },
}

// ── Row Sets ────────────────────────────────────────────────────────────────

/// A read-only snapshot of the rows a query matched.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
    /// Identifier to watch for changes to this result, set by the provider.
    pub notification_uri: Option<MovieUri>,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of `column` in row `row`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Each row as a column → value map.
    pub fn iter(&self) -> impl Iterator<Item = ContentValues> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect()
        })
    }

    /// Each row as a typed record. Requires a full-column projection.
    pub fn records(&self) -> Result<Vec<MovieRecord>, RecordError> {
        self.iter().map(|row| MovieRecord::from_values(&row)).collect()
    }
}

// ── Engine Primitives ───────────────────────────────────────────────────────

/// Run a `SELECT` against `table`.
///
/// `columns` of `None` selects every column. `selection` and `order_by` are
/// SQL fragments; values are only ever bound through `args`.
#[allow(clippy::too_many_arguments)]
pub fn query(
    conn: &Connection,
    table: &str,
    columns: Option<&[String]>,
    selection: Option<&str>,
    args: &[FieldValue],
    group_by: Option<&str>,
    having: Option<&str>,
    order_by: Option<&str>,
) -> Result<RowSet, EngineError> {
    let projection = match columns {
        Some(cols) if !cols.is_empty() => cols.join(", "),
        _ => "*".to_string(),
    };
    let mut sql = format!("SELECT {projection} FROM {table}");
    if let Some(clause) = non_empty(selection) {
        sql.push_str(&format!(" WHERE {clause}"));
    }
    if let Some(clause) = non_empty(group_by) {
        sql.push_str(&format!(" GROUP BY {clause}"));
    }
    if let Some(clause) = non_empty(having) {
        sql.push_str(&format!(" HAVING {clause}"));
    }
    if let Some(clause) = non_empty(order_by) {
        sql.push_str(&format!(" ORDER BY {clause}"));
    }
    log::debug!("{} {:?}", sql, args);

    let mut stmt = conn.prepare(&sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = names.len();
    let rows = stmt.query_map(params_from_iter(args.iter().map(to_sql)), |row| {
        (0..width)
            .map(|i| row.get_ref(i).map(from_sql))
            .collect::<Result<Vec<_>, _>>()
    })?;
    let rows = rows.collect::<Result<Vec<_>, _>>()?;

    Ok(RowSet {
        columns: names,
        rows,
        notification_uri: None,
    })
}

/// Insert a row, replacing any existing row that conflicts on a unique key.
/// Returns the row id of the written row.
pub fn insert_or_replace(
    conn: &Connection,
    table: &str,
    values: &ContentValues,
) -> Result<i64, EngineError> {
    if values.is_empty() {
        return Err(EngineError::EmptyValues {
            operation: "insert",
            table: table.to_string(),
        });
    }

    let mut names = Vec::with_capacity(values.len());
    let mut params = Vec::with_capacity(values.len());
    for (column, value) in values.iter() {
        check_column(column)?;
        names.push(column);
        params.push(to_sql(value));
    }
    let placeholders = vec!["?"; names.len()].join(", ");
    let sql = format!(
        "INSERT OR REPLACE INTO {table} ({}) VALUES ({placeholders})",
        names.join(", ")
    );
    log::debug!("{}", sql);

    conn.execute(&sql, params_from_iter(params))?;
    Ok(conn.last_insert_rowid())
}

/// Update rows matching `selection`. Returns the number of rows changed.
pub fn update(
    conn: &Connection,
    table: &str,
    values: &ContentValues,
    selection: Option<&str>,
    args: &[FieldValue],
) -> Result<usize, EngineError> {
    if values.is_empty() {
        return Err(EngineError::EmptyValues {
            operation: "update",
            table: table.to_string(),
        });
    }

    let mut assignments = Vec::with_capacity(values.len());
    let mut params = Vec::with_capacity(values.len() + args.len());
    for (column, value) in values.iter() {
        check_column(column)?;
        assignments.push(format!("{column} = ?"));
        params.push(to_sql(value));
    }
    params.extend(args.iter().map(to_sql));

    let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
    if let Some(clause) = non_empty(selection) {
        sql.push_str(&format!(" WHERE {clause}"));
    }
    log::debug!("{} {:?}", sql, args);

    Ok(conn.execute(&sql, params_from_iter(params))?)
}

/// Delete rows matching `selection`. Returns the number of rows removed.
pub fn delete(
    conn: &Connection,
    table: &str,
    selection: Option<&str>,
    args: &[FieldValue],
) -> Result<usize, EngineError> {
    let mut sql = format!("DELETE FROM {table}");
    if let Some(clause) = non_empty(selection) {
        sql.push_str(&format!(" WHERE {clause}"));
    }
    log::debug!("{} {:?}", sql, args);

    Ok(conn.execute(&sql, params_from_iter(args.iter().map(to_sql)))?)
}

/// Run `f` inside a transaction on `conn`.
///
/// The transaction commits only if `f` returns `Ok`. On error (or panic) the
/// transaction guard is dropped uncommitted and SQLite rolls it back.
pub fn with_transaction<T, E>(
    conn: &Connection,
    f: impl FnOnce(&Connection) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<rusqlite::Error>,
{
    let tx = conn.unchecked_transaction()?;
    let out = f(&*tx)?;
    tx.commit()?;
    Ok(out)
}

// ── Store Handle ────────────────────────────────────────────────────────────

/// Where a `MovieStore` keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// Owner of the single database connection.
///
/// The connection is opened (and the schema created or migrated) on first
/// use and then held for the lifetime of the store. It is never reopened.
#[derive(Debug)]
pub struct MovieStore {
    location: StoreLocation,
    conn: OnceCell<Connection>,
}

impl MovieStore {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File(path.as_ref().to_path_buf()),
            conn: OnceCell::new(),
        }
    }

    pub fn memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            conn: OnceCell::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// The open connection, opening it on first call.
    pub fn connection(&self) -> Result<&Connection, SchemaError> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn);
        }
        let opened = match &self.location {
            StoreLocation::File(path) => schema::open_database(path)?,
            StoreLocation::Memory => schema::open_memory()?,
        };
        Ok(self.conn.get_or_init(|| opened))
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn non_empty(clause: Option<&str>) -> Option<&str> {
    clause.map(str::trim).filter(|c| !c.is_empty())
}

/// Column names are spliced into SQL, so only plain identifiers are allowed.
fn check_column(name: &str) -> Result<(), EngineError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidColumn(name.to_string()))
    }
}

fn to_sql(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Integer(v) => Value::Integer(*v),
        FieldValue::Real(v) => Value::Real(*v),
        FieldValue::Text(s) => Value::Text(s.clone()),
    }
}

fn from_sql(value: ValueRef<'_>) -> FieldValue {
    match value {
        ValueRef::Null => FieldValue::Null,
        ValueRef::Integer(v) => FieldValue::Integer(v),
        ValueRef::Real(v) => FieldValue::Real(v),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            FieldValue::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
