use crate::error::ProntoError;
use crate::extraction::{Fragment, PageFragments, PdfExtractor};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Runs `pdftotext -bbox-layout` and turns every text line of the XHTML
/// output into one positioned fragment. pdftotext measures y from the top
/// of the page; fragments are flipped into PDF space (y grows upward) using
/// the line's bottom edge as its baseline.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageFragments>, ProntoError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ProntoError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ProntoError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProntoError::PdftotextNotFound
                } else {
                    ProntoError::Extraction(format!("pdftotext -bbox-layout failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ProntoError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xml(&xml)?;
        tracing::debug!(
            pages = pages.len(),
            fragments = pages.iter().map(|p| p.fragments.len()).sum::<usize>(),
            "pdftotext extraction finished"
        );
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn parse_bbox_xml(xml: &str) -> Result<Vec<PageFragments>, ProntoError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages = Vec::new();
    let mut current_page: Option<PageFragments> = None;
    let mut page_height = 0.0_f32;
    // (x_min, y_max) of the line being read
    let mut current_line: Option<(f32, f32)> = None;
    let mut current_words: Vec<String> = Vec::new();
    let mut in_word = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ProntoError::Extraction(format!("malformed pdftotext output: {e}")))?;

        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => {
                    page_height = attr_f32(&tag, b"height").unwrap_or(0.0);
                    current_page = Some(PageFragments {
                        page_number: pages.len() + 1,
                        fragments: Vec::new(),
                    });
                }
                b"line" => {
                    current_line = attr_f32(&tag, b"xMin").zip(attr_f32(&tag, b"yMax"));
                    current_words.clear();
                }
                b"word" => in_word = true,
                _ => {}
            },
            Event::Text(text) if in_word => {
                let word = text.unescape().map_err(|e| {
                    ProntoError::Extraction(format!("bad text in pdftotext output: {e}"))
                })?;
                let word = word.trim();
                if !word.is_empty() {
                    current_words.push(word.to_string());
                }
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let (Some(page), Some((x_min, y_max))) =
                        (current_page.as_mut(), current_line.take())
                    {
                        let text = current_words.join(" ");
                        if !text.is_empty() {
                            page.fragments
                                .push(Fragment::new(text, x_min, page_height - y_max));
                        }
                    }
                    current_words.clear();
                }
                b"page" => {
                    if let Some(page) = current_page.take() {
                        pages.push(page);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn attr_f32(tag: &BytesStart<'_>, name: &[u8]) -> Option<f32> {
    tag.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.trim().parse().ok())
}
