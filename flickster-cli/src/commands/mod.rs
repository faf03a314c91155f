pub(crate) mod config;
pub(crate) mod mutate;
pub(crate) mod query;

use std::path::PathBuf;

use flickster_catalog::{ContentValues, FieldValue};
use flickster_db::{MovieProvider, MovieStore};

use crate::CliError;
use crate::cli_types::SelectionArgs;

/// Build a provider over the resolved database file.
///
/// The file is opened lazily by the store on first use.
pub(crate) fn open_provider(db: Option<PathBuf>) -> MovieProvider {
    let path = crate::settings::resolve_database_path(db);
    log::debug!("Using movie database at {}", path.display());
    MovieProvider::new(MovieStore::file(path))
}

/// Split selection flags into the provider's `(selection, args)` pair.
pub(crate) fn selection_parts(selection: &SelectionArgs) -> (Option<&str>, Vec<FieldValue>) {
    let args = selection
        .args
        .iter()
        .map(|a| FieldValue::parse_loose(a))
        .collect();
    (selection.selection.as_deref(), args)
}

/// Convert a JSON object into column values.
///
/// Booleans become 0/1; nested arrays and objects are rejected.
pub(crate) fn values_from_json(json: &serde_json::Value) -> Result<ContentValues, CliError> {
    let object = json
        .as_object()
        .ok_or_else(|| CliError::input("expected a JSON object of column values"))?;

    let mut values = ContentValues::new();
    for (column, value) in object {
        let field = match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::from(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Real(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(CliError::input(format!(
                    "column '{}' must be a scalar value",
                    column
                )));
            }
        };
        values.put(column.as_str(), field);
    }
    Ok(values)
}

/// Parse `column=value` assignments for `update --set`.
pub(crate) fn parse_assignments(assignments: &[String]) -> Result<ContentValues, CliError> {
    let mut values = ContentValues::new();
    for assignment in assignments {
        let (column, raw) = assignment.split_once('=').ok_or_else(|| {
            CliError::input(format!("expected column=value, got '{}'", assignment))
        })?;
        let column = column.trim();
        if column.is_empty() {
            return Err(CliError::input(format!("missing column in '{}'", assignment)));
        }
        values.put(column, FieldValue::parse_loose(raw.trim()));
    }
    Ok(values)
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
