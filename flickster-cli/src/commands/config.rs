use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings;

pub(crate) fn run_config_show(db: Option<PathBuf>) {
    let path = settings::settings_path();
    log::info!(
        "{}",
        "Flickster Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Settings file: {}", path.display());
    log::info!(
        "  Database:      {}",
        settings::resolve_database_path(db).display()
    );
    crate::log_blank();
    match settings::load_settings_string() {
        Some(contents) => log::info!("{}", contents.trim_end()),
        None => log::info!("(no settings file)"),
    }
}

pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

pub(crate) fn run_config_set_db(path: Option<PathBuf>, clear: bool) -> Result<(), CliError> {
    match (path, clear) {
        (Some(p), false) => {
            let absolute = std::path::absolute(&p)?;
            settings::save_database_path(Some(&absolute))
                .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
            log::info!("Default database set to {}", absolute.display());
        }
        (None, true) => {
            settings::save_database_path(None)
                .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
            log::info!("Default database cleared");
        }
        _ => {
            return Err(CliError::config("give a database path or --clear"));
        }
    }
    Ok(())
}
