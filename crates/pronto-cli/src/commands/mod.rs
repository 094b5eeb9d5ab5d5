pub mod config;
pub mod grid;
pub mod import;
pub mod schedule;
pub mod statuses;

use pronto_core::config::schema::ImportConfig;
use pronto_core::error::ProntoError;
use pronto_core::roster::store::load_roster;
use pronto_core::roster::Roster;
use std::path::Path;

/// Report formats the importer reads, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pdf,
    Xlsx,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Result<InputKind, ProntoError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(InputKind::Pdf),
            "xlsx" | "xlsm" => Ok(InputKind::Xlsx),
            _ => Err(ProntoError::UnsupportedInput(path.display().to_string())),
        }
    }
}

pub fn load_config_or_default(path: Option<&Path>) -> Result<ImportConfig, ProntoError> {
    match path {
        Some(path) => pronto_core::config::load_config(path),
        None => Ok(ImportConfig::default()),
    }
}

/// Load the roster, or start an empty one when the file does not exist yet.
pub fn load_or_new_roster(path: &Path) -> Result<Roster, ProntoError> {
    if path.exists() {
        load_roster(path)
    } else {
        tracing::info!(path = %path.display(), "roster file not found, starting an empty roster");
        Ok(Roster::default())
    }
}
