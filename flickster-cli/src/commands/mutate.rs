use std::path::{Path, PathBuf};

use flickster_catalog::MovieRecord;

use crate::CliError;
use crate::cli_types::SelectionArgs;

use super::{open_provider, parse_assignments, selection_parts, values_from_json};

pub(crate) fn run_insert(db: Option<PathBuf>, uri: &str, json: &str) -> Result<(), CliError> {
    let parsed: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| CliError::input(format!("Invalid JSON: {}", e)))?;
    let values = values_from_json(&parsed)?;

    let provider = open_provider(db);
    let inserted = provider.insert(uri, &values)?;
    log::info!("{}", inserted);
    Ok(())
}

pub(crate) fn run_import(db: Option<PathBuf>, uri: &str, file: &Path) -> Result<(), CliError> {
    let contents = std::fs::read_to_string(file)?;
    let movies: Vec<MovieRecord> = serde_json::from_str(&contents).map_err(|e| {
        CliError::input(format!("Invalid movie list in {}: {}", file.display(), e))
    })?;
    let rows: Vec<_> = movies.iter().map(MovieRecord::to_values).collect();

    let provider = open_provider(db);
    let accepted = provider.bulk_insert(uri, &rows)?;
    log::info!("Imported {} of {} movie(s)", accepted, rows.len());
    Ok(())
}

pub(crate) fn run_update(
    db: Option<PathBuf>,
    uri: &str,
    assignments: &[String],
    selection: &SelectionArgs,
) -> Result<(), CliError> {
    let values = parse_assignments(assignments)?;
    let (clause, args) = selection_parts(selection);

    let provider = open_provider(db);
    let updated = provider.update(uri, &values, clause, &args)?;
    log::info!("Updated {} row(s)", updated);
    Ok(())
}

pub(crate) fn run_delete(
    db: Option<PathBuf>,
    uri: &str,
    selection: &SelectionArgs,
) -> Result<(), CliError> {
    let (clause, args) = selection_parts(selection);

    let provider = open_provider(db);
    let deleted = provider.delete(uri, clause, &args)?;
    log::info!("Deleted {} row(s)", deleted);
    Ok(())
}
