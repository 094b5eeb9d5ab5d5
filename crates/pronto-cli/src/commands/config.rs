use pronto_core::config::schema::ImportConfig;
use pronto_core::error::ProntoError;
use std::path::Path;

use crate::output;

pub fn show() -> Result<(), ProntoError> {
    output::json::print(&ImportConfig::default())
}

pub fn validate(path: &Path) -> Result<(), ProntoError> {
    let config = pronto_core::config::load_config(path)?;
    println!("Valid config: {}", path.display());
    println!(
        "  row tolerance {}, header window {} rows, min name length {}",
        config.row_tolerance, config.header_search_rows, config.min_name_len
    );
    if let Some(sheet) = &config.sheet {
        println!("  spreadsheet sheet: {sheet}");
    }
    Ok(())
}
