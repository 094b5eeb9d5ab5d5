pub mod columns;
pub mod date;
pub mod normalize;

use crate::extraction::grid::TextGrid;
use columns::ColumnMap;

/// The two cells the importer reads from one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub row_index: usize,
    pub page_number: Option<usize>,
    pub name: String,
    pub entry: String,
}

/// Pull name and first-entry cells from every row below the header.
///
/// Rows with neither cell filled are dropped; a missing cell (short row)
/// reads as empty.
pub fn data_rows(grid: &TextGrid, columns: &ColumnMap) -> Vec<DataRow> {
    grid.rows
        .iter()
        .enumerate()
        .skip(columns.header_row + 1)
        .filter_map(|(row_index, row)| {
            let name = row.cells.get(columns.name_col).map(|s| s.trim()).unwrap_or("");
            let entry = row.cells.get(columns.entry_col).map(|s| s.trim()).unwrap_or("");
            if name.is_empty() && entry.is_empty() {
                return None;
            }
            Some(DataRow {
                row_index,
                page_number: row.page_number,
                name: name.to_string(),
                entry: entry.to_string(),
            })
        })
        .collect()
}
