//! Names shared between the store and its consumers: table and column names,
//! the resource-identifier scheme, and content kind descriptors.

/// Scheme prefix of a full resource identifier.
pub const SCHEME: &str = "content://";
/// Authority that every movie resource identifier is addressed under.
pub const CONTENT_AUTHORITY: &str = "com.movie.flickster";
/// Collection path segment.
pub const PATH_MOVIE: &str = "movie";

pub const FILTER_POPULAR: &str = "popular";
pub const FILTER_TOP_RATED: &str = "top_rated";

// ── Table ───────────────────────────────────────────────────────────────────

pub const TABLE_MOVIE: &str = "movie";

pub const COLUMN_ID: &str = "id";
pub const COLUMN_DATE: &str = "date";
pub const COLUMN_POPULAR: &str = "popular";
pub const COLUMN_TOP_RATED: &str = "top_rated";
pub const COLUMN_POPULARITY: &str = "popularity";
pub const COLUMN_USER_RATING: &str = "user_rating";
pub const COLUMN_TITLE: &str = "title";
pub const COLUMN_ORIGINAL_TITLE: &str = "original_title";
pub const COLUMN_OVERVIEW: &str = "overview";
pub const COLUMN_POSTER_PATH: &str = "poster_path";
pub const COLUMN_BACKDROP_PATH: &str = "backdrop_path";
pub const COLUMN_RELEASE_DATE: &str = "release_date";

/// Every column of the `movie` table, in schema order.
pub const MOVIE_COLUMNS: &[&str] = &[
    COLUMN_ID,
    COLUMN_DATE,
    COLUMN_POPULAR,
    COLUMN_TOP_RATED,
    COLUMN_POPULARITY,
    COLUMN_USER_RATING,
    COLUMN_TITLE,
    COLUMN_ORIGINAL_TITLE,
    COLUMN_OVERVIEW,
    COLUMN_POSTER_PATH,
    COLUMN_BACKDROP_PATH,
    COLUMN_RELEASE_DATE,
];

// ── Content Kinds ───────────────────────────────────────────────────────────

/// What a resource identifier resolves to: a list of movies or one movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Collection,
    Item,
}

impl ContentKind {
    /// MIME-style type descriptor, e.g. `vnd.cursor.dir/com.movie.flickster/movie`.
    pub fn mime_type(&self) -> String {
        let prefix = match self {
            ContentKind::Collection => "vnd.cursor.dir",
            ContentKind::Item => "vnd.cursor.item",
        };
        format!("{prefix}/{CONTENT_AUTHORITY}/{PATH_MOVIE}")
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.mime_type())
    }
}

// ── Identifier Builders ─────────────────────────────────────────────────────

/// `content://com.movie.flickster/movie`
pub fn movie_uri() -> String {
    format!("{SCHEME}{CONTENT_AUTHORITY}/{PATH_MOVIE}")
}

pub fn movie_with_date(date: i64) -> String {
    format!("{}/{date}", movie_uri())
}

pub fn movie_with_filter(keyword: &str) -> String {
    format!("{}/{keyword}", movie_uri())
}

/// Item identifier, also what a successful insert hands back.
pub fn movie_with_date_and_id(date: i64, id: i64) -> String {
    format!("{}/{date}/{id}", movie_uri())
}
