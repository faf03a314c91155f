//! Resource identifier parsing and classification.
//!
//! Accepts either the full form `content://com.movie.flickster/movie/...` or
//! the bare path `movie/...`, and classifies it into one of four shapes.
//! Classification is pure; nothing here touches the database.

use flickster_catalog::ContentKind;
use flickster_catalog::contract::{
    CONTENT_AUTHORITY, FILTER_POPULAR, FILTER_TOP_RATED, PATH_MOVIE, SCHEME,
};

use crate::error::ProviderError;

/// Named list selected by a non-numeric second segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFilter {
    Popular,
    TopRated,
    /// Any other keyword. Served with the popular selection, unsorted.
    Other(String),
}

impl MovieFilter {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            FILTER_POPULAR => MovieFilter::Popular,
            FILTER_TOP_RATED => MovieFilter::TopRated,
            other => MovieFilter::Other(other.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            MovieFilter::Popular => FILTER_POPULAR,
            MovieFilter::TopRated => FILTER_TOP_RATED,
            MovieFilter::Other(k) => k,
        }
    }
}

/// The four resource shapes the store serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceShape {
    /// `movie`
    AllMovies,
    /// `movie/{date}`
    ByDate { date: i64 },
    /// `movie/{keyword}`
    ByFilter(MovieFilter),
    /// `movie/{date}/{id}`
    ByDateAndId { date: i64, id: i64 },
}

impl ResourceShape {
    pub fn content_kind(&self) -> ContentKind {
        match self {
            ResourceShape::AllMovies
            | ResourceShape::ByDate { .. }
            | ResourceShape::ByFilter(_) => ContentKind::Collection,
            ResourceShape::ByDateAndId { .. } => ContentKind::Item,
        }
    }
}

/// A classified resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieUri {
    segments: Vec<String>,
    shape: ResourceShape,
}

impl MovieUri {
    /// Parse and classify an identifier.
    ///
    /// Fails with `UnsupportedResource` for any scheme, authority, or
    /// segment combination outside the four shapes.
    pub fn parse(input: &str) -> Result<Self, ProviderError> {
        let unsupported = || ProviderError::unsupported(input);

        let trimmed = input.trim();
        let without_extras = trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let path = if let Some(rest) = without_extras.strip_prefix(SCHEME) {
            let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
            if authority != CONTENT_AUTHORITY {
                return Err(unsupported());
            }
            path
        } else if without_extras.contains("://") {
            return Err(unsupported());
        } else {
            without_extras
        };

        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let shape = match segments.as_slice() {
            [collection] if collection == PATH_MOVIE => ResourceShape::AllMovies,
            [collection, second] if collection == PATH_MOVIE => {
                if is_digits(second) {
                    let date = parse_number(second).ok_or_else(unsupported)?;
                    ResourceShape::ByDate { date }
                } else {
                    ResourceShape::ByFilter(MovieFilter::from_keyword(second))
                }
            }
            [collection, date, id] if collection == PATH_MOVIE => {
                let date = parse_number(date).ok_or_else(unsupported)?;
                let id = parse_number(id).ok_or_else(unsupported)?;
                ResourceShape::ByDateAndId { date, id }
            }
            _ => return Err(unsupported()),
        };

        Ok(Self { segments, shape })
    }

    /// Build the identifier for a shape directly.
    pub fn from_shape(shape: ResourceShape) -> Self {
        let mut segments = vec![PATH_MOVIE.to_string()];
        match &shape {
            ResourceShape::AllMovies => {}
            ResourceShape::ByDate { date } => segments.push(date.to_string()),
            ResourceShape::ByFilter(filter) => segments.push(filter.keyword().to_string()),
            ResourceShape::ByDateAndId { date, id } => {
                segments.push(date.to_string());
                segments.push(id.to_string());
            }
        }
        Self { segments, shape }
    }

    pub fn shape(&self) -> &ResourceShape {
        &self.shape
    }

    pub fn content_kind(&self) -> ContentKind {
        self.shape.content_kind()
    }

    /// True if `other` lies strictly below this identifier.
    pub fn is_ancestor_of(&self, other: &MovieUri) -> bool {
        other.segments.len() > self.segments.len()
            && other.segments.starts_with(&self.segments)
    }
}

impl std::fmt::Display for MovieUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SCHEME}{CONTENT_AUTHORITY}/{}", self.segments.join("/"))
    }
}

impl std::str::FromStr for MovieUri {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// All-digit segment that fits in an `i64`.
fn parse_number(segment: &str) -> Option<i64> {
    if is_digits(segment) {
        segment.parse().ok()
    } else {
        None
    }
}
