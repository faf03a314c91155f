//! flickster CLI
//!
//! Command-line interface for querying and maintaining the local movie store.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db;
    match cli.command {
        Commands::Type { uri } => commands::query::run_type(db, &uri),
        Commands::Query {
            uri,
            columns,
            selection,
            order,
            json,
        } => commands::query::run_query(db, &uri, columns, &selection, order, json),
        Commands::Insert { uri, json } => commands::mutate::run_insert(db, &uri, &json),
        Commands::Import { uri, file } => commands::mutate::run_import(db, &uri, &file),
        Commands::Update {
            uri,
            assignments,
            selection,
        } => commands::mutate::run_update(db, &uri, &assignments, &selection),
        Commands::Delete { uri, selection } => commands::mutate::run_delete(db, &uri, &selection),
        Commands::Today => commands::query::run_today(db),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(db);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDb { path, clear } => commands::config::run_config_set_db(path, clear),
        },
    }
}

/// Set up `env_logger`.
///
/// Normal output goes through `log::info!` as plain lines; warnings and
/// errors get a level prefix. `--verbose` switches to timestamped debug
/// output, `--quiet` drops info lines. `RUST_LOG` overrides both.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if !verbose {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
        builder.target(env_logger::Target::Stdout);
    }

    builder.init();
}

/// Print an empty line through the logger so `--quiet` suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}
