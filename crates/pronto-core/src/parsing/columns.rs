use serde::Serialize;

use crate::config::schema::{HeaderLabels, ImportConfig};
use crate::error::ProntoError;
use crate::extraction::grid::TextGrid;
use crate::parsing::normalize::normalize_text;

/// Where the fields the importer reads live in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    /// Last header row; data rows start right after it.
    pub header_row: usize,
    pub name_col: usize,
    pub entry_col: usize,
}

/// Header labels with the same normalization applied as to cell text.
struct LabelSet {
    exact: Vec<String>,
    contains: Vec<String>,
}

impl LabelSet {
    fn new(labels: &HeaderLabels) -> Self {
        let normalize_all = |labels: &[String]| -> Vec<String> {
            labels
                .iter()
                .map(|l| normalize_text(l))
                .filter(|l| !l.is_empty())
                .collect()
        };
        LabelSet {
            exact: normalize_all(&labels.exact),
            contains: normalize_all(&labels.contains),
        }
    }

    fn matches(&self, cell: &str) -> bool {
        !cell.is_empty()
            && (self.exact.iter().any(|l| l == cell)
                || self.contains.iter().any(|l| cell.contains(l.as_str())))
    }
}

/// Find the name and first-entry columns within the header search window.
///
/// Both labels are searched independently, first occurrence wins. When either
/// is missing the whole import must stop; no default column is assumed.
pub fn locate_columns(grid: &TextGrid, config: &ImportConfig) -> Result<ColumnMap, ProntoError> {
    let name_labels = LabelSet::new(&config.name_labels);
    let entry_labels = LabelSet::new(&config.entry_labels);

    let mut name: Option<(usize, usize)> = None;
    let mut entry: Option<(usize, usize)> = None;

    for (row_idx, row) in grid.rows.iter().take(config.header_search_rows).enumerate() {
        for (col_idx, cell) in row.cells.iter().enumerate() {
            let norm = normalize_text(cell);
            if name.is_none() && name_labels.matches(&norm) {
                name = Some((row_idx, col_idx));
            } else if entry.is_none() && entry_labels.matches(&norm) {
                entry = Some((row_idx, col_idx));
            }
        }
        if name.is_some() && entry.is_some() {
            break;
        }
    }

    match (name, entry) {
        (Some((name_row, name_col)), Some((entry_row, entry_col))) => {
            let map = ColumnMap {
                header_row: name_row.max(entry_row),
                name_col,
                entry_col,
            };
            tracing::debug!(?map, "located header columns");
            Ok(map)
        }
        _ => {
            let mut fields = Vec::new();
            if name.is_none() {
                fields.push("name (FUNCIONÁRIO/NOME)");
            }
            if entry.is_none() {
                fields.push("first entry (1º ENTRADA)");
            }
            Err(ProntoError::MissingColumn { fields })
        }
    }
}
