//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flickster")]
#[command(about = "Query and maintain the local movie store", long_about = None)]
pub(crate) struct Cli {
    /// Movie database file (defaults to the configured or standard location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Caller-supplied predicate for commands that accept one.
#[derive(Args, Clone, Default)]
pub(crate) struct SelectionArgs {
    /// SQL predicate with `?` placeholders (e.g. "id = ?")
    #[arg(long = "where")]
    pub selection: Option<String>,

    /// Value bound to the next `?` placeholder (repeatable)
    #[arg(long = "arg")]
    pub args: Vec<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the content kind of a resource identifier
    Type {
        /// Resource identifier (e.g. movie/popular)
        uri: String,
    },

    /// Query movies
    Query {
        /// Resource identifier (e.g. movie, movie/20240101, movie/top_rated)
        #[arg(default_value = "movie")]
        uri: String,

        /// Columns to return
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Sort order (e.g. "user_rating DESC")
        #[arg(long)]
        order: Option<String>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Insert or replace a single movie from a JSON object
    Insert {
        /// Target identifier
        uri: String,

        /// JSON object of column values
        json: String,
    },

    /// Bulk insert movies from a JSON array file
    Import {
        /// Target identifier
        uri: String,

        /// File containing a JSON array of movie records
        file: PathBuf,
    },

    /// Update movies
    Update {
        /// Target identifier
        uri: String,

        /// Column assignment (repeatable), e.g. --set user_rating=8.1
        #[arg(long = "set", required = true)]
        assignments: Vec<String>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Delete movies (all of them when no --where is given)
    Delete {
        /// Target identifier
        #[arg(default_value = "movie")]
        uri: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Print today's date bucket and its by-date identifier
    Today,

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and the resolved database path
    Show,

    /// Print the settings file path
    Path,

    /// Save (or clear) the default database path
    SetDb {
        /// Database file to use by default
        path: Option<PathBuf>,

        /// Remove the saved path
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
}
