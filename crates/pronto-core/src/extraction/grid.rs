use serde::Serialize;

use crate::extraction::{Fragment, PageFragments};

/// Fragments believed to sit on one horizontal table row, ordered left to right.
#[derive(Debug, Clone)]
pub struct ReconstructedRow {
    /// Representative y: the y of the fragment that opened the row.
    pub y: f32,
    pub cells: Vec<Fragment>,
}

impl ReconstructedRow {
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|f| f.text.clone()).collect()
    }
}

/// Rebuild table rows from one page of positioned fragments.
///
/// A fragment joins the first row whose representative y is within
/// `tolerance` of its own, otherwise it opens a new row. Rows are never
/// re-merged once split. Cells are then ordered by ascending x and rows by
/// descending y (page space grows upward, so this is top to bottom).
/// Whitespace-only fragments are dropped.
pub fn reconstruct_rows(fragments: &[Fragment], tolerance: f32) -> Vec<ReconstructedRow> {
    let mut rows: Vec<ReconstructedRow> = Vec::new();

    for fragment in fragments {
        if fragment.text.trim().is_empty() {
            continue;
        }
        match rows
            .iter_mut()
            .find(|row| (row.y - fragment.y).abs() <= tolerance)
        {
            Some(row) => row.cells.push(fragment.clone()),
            None => rows.push(ReconstructedRow {
                y: fragment.y,
                cells: vec![fragment.clone()],
            }),
        }
    }

    for row in &mut rows {
        row.cells.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    rows.sort_by(|a, b| b.y.total_cmp(&a.y));

    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    /// Source page for PDF input; `None` for spreadsheets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,
    pub cells: Vec<String>,
}

/// An ordered 2-D grid of cell strings, the common shape of PDF and spreadsheet input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextGrid {
    pub rows: Vec<GridRow>,
}

impl TextGrid {
    /// Reconstruct every page and concatenate the rows in page order.
    pub fn from_pages(pages: &[PageFragments], tolerance: f32) -> TextGrid {
        let rows = pages
            .iter()
            .flat_map(|page| {
                reconstruct_rows(&page.fragments, tolerance)
                    .into_iter()
                    .map(move |row| GridRow {
                        page_number: Some(page.page_number),
                        cells: row.texts().into_iter().map(|t| t.trim().to_string()).collect(),
                    })
            })
            .collect();
        TextGrid { rows }
    }

    pub fn from_cells(cells: Vec<Vec<String>>) -> TextGrid {
        TextGrid {
            rows: cells
                .into_iter()
                .map(|cells| GridRow {
                    page_number: None,
                    cells,
                })
                .collect(),
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.cells.get(col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(rows: &[ReconstructedRow]) -> Vec<Vec<String>> {
        rows.iter().map(|r| r.texts()).collect()
    }

    #[test]
    fn test_rows_ordered_top_down_cells_left_right() {
        let fragments = vec![
            Fragment::new("B", 10.0, 100.0),
            Fragment::new("A", 5.0, 100.0),
            Fragment::new("X", 0.0, 50.0),
        ];
        let rows = reconstruct_rows(&fragments, 8.0);
        assert_eq!(texts(&rows), vec![vec!["A", "B"], vec!["X"]]);
    }

    #[test]
    fn test_baseline_jitter_within_tolerance() {
        let fragments = vec![
            Fragment::new("SILVA GONZAGA", 40.0, 700.0),
            Fragment::new("07:31", 300.0, 703.5),
            Fragment::new("86999-X", 10.0, 696.2),
        ];
        let rows = reconstruct_rows(&fragments, 8.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].texts(), vec!["86999-X", "SILVA GONZAGA", "07:31"]);
    }

    #[test]
    fn test_first_fit_does_not_remerge() {
        // 100 opens a row, 109 is out of reach and opens another, 104.5 is
        // within reach of both and joins the first one found.
        let fragments = vec![
            Fragment::new("a", 0.0, 100.0),
            Fragment::new("b", 0.0, 109.0),
            Fragment::new("c", 5.0, 104.5),
        ];
        let rows = reconstruct_rows(&fragments, 8.0);
        assert_eq!(texts(&rows), vec![vec!["b"], vec!["a", "c"]]);
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let fragments = vec![Fragment::new("a", 0.0, 100.0), Fragment::new("b", 5.0, 104.0)];
        assert_eq!(reconstruct_rows(&fragments, 8.0).len(), 1);
        assert_eq!(reconstruct_rows(&fragments, 2.0).len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(reconstruct_rows(&[], 8.0).is_empty());
        assert!(reconstruct_rows(&[Fragment::new("  ", 0.0, 0.0)], 8.0).is_empty());
    }

    #[test]
    fn test_pages_concatenated_in_order() {
        let pages = vec![
            PageFragments {
                page_number: 1,
                fragments: vec![Fragment::new("p1 low", 0.0, 10.0), Fragment::new("p1 top", 0.0, 500.0)],
            },
            PageFragments {
                page_number: 2,
                fragments: vec![Fragment::new("p2 top", 0.0, 500.0)],
            },
        ];
        let grid = TextGrid::from_pages(&pages, 8.0);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.cell(0, 0), Some("p1 top"));
        assert_eq!(grid.cell(1, 0), Some("p1 low"));
        assert_eq!(grid.cell(2, 0), Some("p2 top"));
        assert_eq!(grid.rows[2].page_number, Some(2));
        assert_eq!(grid.cell(2, 1), None);
    }
}
