pub mod grid;
pub mod pdftotext;
pub mod xlsx;

use crate::error::ProntoError;

/// A run of text with its position in page space (y grows upward).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl Fragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Fragment {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Positioned fragments extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageFragments {
    pub page_number: usize,
    pub fragments: Vec<Fragment>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned text from PDF bytes, returning one entry per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageFragments>, ProntoError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// A document as delivered by a reader, before any table detection.
#[derive(Debug, Clone)]
pub enum SourceDocument {
    /// PDF pages of positioned fragments; rows still have to be reconstructed.
    Pdf(Vec<PageFragments>),
    /// Spreadsheet cells; the reader's row structure is authoritative.
    Sheet(Vec<Vec<String>>),
}
