pub mod classify;
pub mod config;
pub mod error;
pub mod extraction;
pub mod import;
pub mod model;
pub mod parsing;
pub mod roster;

use config::schema::ImportConfig;
use error::ProntoError;
use extraction::grid::TextGrid;
use extraction::{PdfExtractor, SourceDocument};
use import::outcome::ImportResult;
use import::{enter_phase, import_grid, ImportOptions, ImportPhase};
use roster::{ImportKind, Roster};

/// Main API entry point: merge one day's attendance PDF into the roster.
pub fn import_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    roster: &mut Roster,
    config: &ImportConfig,
    options: &ImportOptions,
) -> Result<ImportResult, ProntoError> {
    enter_phase(ImportPhase::Reading);
    tracing::debug!(backend = extractor.backend_name(), bytes = pdf_bytes.len(), "extracting pdf text");
    let pages = extractor.extract_pages(pdf_bytes)?;
    import_document(SourceDocument::Pdf(pages), roster, config, options)
}

/// Merge one day's attendance spreadsheet into the roster.
pub fn import_xlsx(
    xlsx_bytes: &[u8],
    roster: &mut Roster,
    config: &ImportConfig,
    options: &ImportOptions,
) -> Result<ImportResult, ProntoError> {
    enter_phase(ImportPhase::Reading);
    let cells = extraction::xlsx::read_xlsx_grid(xlsx_bytes, config.sheet.as_deref())?;
    import_document(SourceDocument::Sheet(cells), roster, config, options)
}

/// Merge an already-read document into the roster.
pub fn import_document(
    document: SourceDocument,
    roster: &mut Roster,
    config: &ImportConfig,
    options: &ImportOptions,
) -> Result<ImportResult, ProntoError> {
    let kind = match &document {
        SourceDocument::Pdf(_) => ImportKind::Pdf,
        SourceDocument::Sheet(_) => ImportKind::Sheet,
    };
    let grid = build_grid(document, config);
    tracing::debug!(rows = grid.len(), ?kind, "document grid built");
    import_grid(&grid, kind, roster, config, options)
}

/// Turn a document into the row/cell grid that header detection reads.
pub fn build_grid(document: SourceDocument, config: &ImportConfig) -> TextGrid {
    match document {
        SourceDocument::Pdf(pages) => TextGrid::from_pages(&pages, config.row_tolerance),
        SourceDocument::Sheet(cells) => TextGrid::from_cells(cells),
    }
}
