//! Selection building: resource shape → parameterized `WHERE` clause.

use flickster_catalog::FieldValue;
use flickster_catalog::contract::{COLUMN_POPULARITY, COLUMN_USER_RATING};

use crate::uri::{MovieFilter, ResourceShape};

const DATE_SELECTION: &str = "movie.date = ?";
const POPULAR_SELECTION: &str = "movie.date = ? AND movie.popular = ?";
const TOP_RATED_SELECTION: &str = "movie.date = ? AND movie.top_rated = ?";
const DATE_WITH_ID_SELECTION: &str = "movie.date = ? AND movie.id = ?";

/// A caller's query request.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub projection: Option<Vec<String>>,
    pub selection: Option<String>,
    pub selection_args: Vec<FieldValue>,
    pub sort_order: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn filter(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    pub fn arg(mut self, value: impl Into<FieldValue>) -> Self {
        self.selection_args.push(value.into());
        self
    }

    pub fn order_by(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }
}

/// The clause, bound parameters, and default ordering for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// `None` means the caller's selection passes through.
    pub clause: Option<&'static str>,
    pub args: Vec<FieldValue>,
    /// Applied only when the caller gives no ordering.
    pub default_order: Option<String>,
}

impl Selection {
    /// Build the selection for `shape`. `today` is the current date bucket,
    /// used only by the filter shapes.
    pub fn for_shape(shape: &ResourceShape, today: i64) -> Self {
        match shape {
            ResourceShape::AllMovies => Self {
                clause: None,
                args: Vec::new(),
                default_order: None,
            },
            ResourceShape::ByDate { date } => Self {
                clause: Some(DATE_SELECTION),
                args: vec![FieldValue::Integer(*date)],
                default_order: None,
            },
            ResourceShape::ByFilter(filter) => {
                let args = vec![FieldValue::Integer(today), FieldValue::Integer(1)];
                match filter {
                    MovieFilter::Popular => Self {
                        clause: Some(POPULAR_SELECTION),
                        args,
                        default_order: Some(format!("{COLUMN_POPULARITY} DESC")),
                    },
                    MovieFilter::TopRated => Self {
                        clause: Some(TOP_RATED_SELECTION),
                        args,
                        default_order: Some(format!("{COLUMN_USER_RATING} DESC")),
                    },
                    MovieFilter::Other(keyword) => {
                        log::warn!(
                            "Unknown movie filter '{}', serving the popular list unsorted",
                            keyword
                        );
                        Self {
                            clause: Some(POPULAR_SELECTION),
                            args,
                            default_order: None,
                        }
                    }
                }
            }
            ResourceShape::ByDateAndId { date, id } => Self {
                clause: Some(DATE_WITH_ID_SELECTION),
                args: vec![FieldValue::Integer(*date), FieldValue::Integer(*id)],
                default_order: None,
            },
        }
    }

    /// Merge with the caller's request into `(selection, args, order)`.
    ///
    /// Shapes with their own clause replace the caller's selection; the
    /// caller's ordering always wins over the default.
    pub fn resolve<'a>(
        &'a self,
        query: &'a Query,
    ) -> (Option<&'a str>, &'a [FieldValue], Option<&'a str>) {
        let order = query
            .sort_order
            .as_deref()
            .or(self.default_order.as_deref());
        match self.clause {
            Some(clause) => (Some(clause), self.args.as_slice(), order),
            None => (
                query.selection.as_deref(),
                query.selection_args.as_slice(),
                order,
            ),
        }
    }
}
