use std::path::PathBuf;

use flickster_catalog::contract::movie_with_date;
use flickster_db::{Query, RowSet};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::SelectionArgs;

use super::{open_provider, selection_parts, truncate_str};

/// Widest a table cell may grow before it is truncated.
const MAX_CELL_WIDTH: usize = 40;

pub(crate) fn run_type(db: Option<PathBuf>, uri: &str) -> Result<(), CliError> {
    let provider = open_provider(db);
    let kind = provider.get_type(uri)?;
    log::info!("{}", kind);
    Ok(())
}

pub(crate) fn run_today(db: Option<PathBuf>) -> Result<(), CliError> {
    let provider = open_provider(db);
    let today = provider.today();
    log::info!("{}", today);
    log::info!("{}", movie_with_date(today));
    Ok(())
}

pub(crate) fn run_query(
    db: Option<PathBuf>,
    uri: &str,
    columns: Option<Vec<String>>,
    selection: &SelectionArgs,
    order: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let provider = open_provider(db);

    let (clause, args) = selection_parts(selection);
    let mut request = Query::new();
    request.projection = columns;
    request.selection = clause.map(String::from);
    request.selection_args = args;
    request.sort_order = order;

    let rows = provider.query(uri, &request)?;

    if json {
        let objects: Vec<_> = rows.iter().collect();
        let out = serde_json::to_string_pretty(&objects)
            .map_err(|e| CliError::database(format!("Failed to encode rows: {}", e)))?;
        println!("{}", out);
    } else {
        print_table(&rows);
    }
    Ok(())
}

fn print_table(rows: &RowSet) {
    if rows.is_empty() {
        log::info!("No movies found.");
        return;
    }

    let cells: Vec<Vec<String>> = rows
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| truncate_str(&v.to_string(), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = rows
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = rows
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{:<w$}", name, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    log::info!("{}", header.if_supports_color(Stdout, |t| t.bold()));

    for row in &cells {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join("  ");
        log::info!("{}", line.trim_end());
    }

    crate::log_blank();
    log::info!("{} row(s)", rows.len());
}
