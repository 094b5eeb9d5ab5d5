use pronto_core::error::ProntoError;
use pronto_core::extraction::pdftotext::PdftotextExtractor;
use pronto_core::extraction::{PdfExtractor, SourceDocument};
use std::path::PathBuf;

use super::InputKind;
use crate::output;

/// Show the grid exactly as header detection will see it.
pub fn run(
    input_file: PathBuf,
    config: Option<PathBuf>,
    output_format: &str,
) -> Result<(), ProntoError> {
    let config = super::load_config_or_default(config.as_deref())?;
    let bytes = std::fs::read(&input_file)?;

    let document = match InputKind::from_path(&input_file)? {
        InputKind::Pdf => SourceDocument::Pdf(PdftotextExtractor::new().extract_pages(&bytes)?),
        InputKind::Xlsx => SourceDocument::Sheet(pronto_core::extraction::xlsx::read_xlsx_grid(
            &bytes,
            config.sheet.as_deref(),
        )?),
    };
    let grid = pronto_core::build_grid(document, &config);

    match output_format {
        "json" => output::json::print(&grid)?,
        _ => output::table::print_grid(&grid),
    }

    Ok(())
}
