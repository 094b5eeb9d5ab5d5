pub mod schema;

use crate::error::ProntoError;
use schema::ImportConfig;
use std::path::Path;

/// Load an import config from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<ImportConfig, ProntoError> {
    let content = std::fs::read_to_string(path).map_err(|e| ProntoError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ImportConfig =
        serde_json::from_str(&content).map_err(|e| ProntoError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse an import config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ImportConfig, ProntoError> {
    let config: ImportConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &ImportConfig) -> Result<(), ProntoError> {
    if !config.row_tolerance.is_finite() || config.row_tolerance <= 0.0 {
        return Err(ProntoError::ConfigInvalid(format!(
            "row_tolerance must be a positive number, got {}",
            config.row_tolerance
        )));
    }

    if config.header_search_rows == 0 {
        return Err(ProntoError::ConfigInvalid(
            "header_search_rows must be at least 1".into(),
        ));
    }

    if config.min_name_len == 0 {
        return Err(ProntoError::ConfigInvalid(
            "min_name_len must be at least 1".into(),
        ));
    }

    if config.name_labels.is_empty() {
        return Err(ProntoError::ConfigInvalid(
            "name_labels must contain at least one label".into(),
        ));
    }

    if config.entry_labels.is_empty() {
        return Err(ProntoError::ConfigInvalid(
            "entry_labels must contain at least one label".into(),
        ));
    }

    if config.imported_id_prefix.trim().is_empty() {
        return Err(ProntoError::ConfigInvalid(
            "imported_id_prefix must not be empty".into(),
        ));
    }

    if config.imported_sector.trim().is_empty() {
        return Err(ProntoError::ConfigInvalid(
            "imported_sector must not be empty".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ImportConfig::default()).is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = parse_config_str(r#"{ "row_tolerance": 4.5, "sheet": "PRONTO" }"#).unwrap();
        assert_eq!(config.row_tolerance, 4.5);
        assert_eq!(config.sheet.as_deref(), Some("PRONTO"));
        assert_eq!(config.min_name_len, 5);
        assert_eq!(config.imported_id_prefix, "IMP-");
    }

    #[test]
    fn test_non_positive_tolerance_rejected() {
        assert!(parse_config_str(r#"{ "row_tolerance": 0 }"#).is_err());
        assert!(parse_config_str(r#"{ "row_tolerance": -2.0 }"#).is_err());
    }

    #[test]
    fn test_empty_labels_rejected() {
        let json = r#"{ "entry_labels": { "exact": [], "contains": [] } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_zero_min_name_len_rejected() {
        assert!(parse_config_str(r#"{ "min_name_len": 0 }"#).is_err());
    }

    #[test]
    fn test_load_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        match load_config(&path) {
            Err(ProntoError::ConfigLoad { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ConfigLoad error, got {other:?}"),
        }
    }
}
