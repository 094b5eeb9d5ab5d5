use serde::Serialize;

use crate::classify::outcome::EntryClass;
use crate::parsing::columns::ColumnMap;
use crate::parsing::date::ReportDate;
use crate::roster::matcher::NameRejection;

/// What happened to one data row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowOutcome {
    Matched { id: String },
    Created { id: String },
    Skipped { reason: NameRejection },
    /// Entry text matched no rule; nothing was written and nobody registered.
    Unrecognized,
}

/// Audit record for one data row, collected only when tracing is requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowTrace {
    pub row_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,
    pub raw_name: String,
    pub raw_entry: String,
    pub classification: EntryClass,
    pub outcome: RowOutcome,
}

/// Summary of one import run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResult {
    /// Data rows merged into the roster.
    pub rows_processed: usize,
    /// Persons that already existed and had their slot written.
    pub updated: usize,
    /// Persons registered by this import.
    pub created: usize,
    /// Data rows dropped by the name guards.
    pub skipped: usize,
    /// Rows with a usable name whose entry text matched no rule; never merged.
    pub unrecognized: usize,
    /// 0-based schedule slot that was written.
    pub target_day: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_date: Option<ReportDate>,
    pub columns: ColumnMap,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<RowTrace>,
}

impl ImportResult {
    /// The one-line message shown after an import.
    pub fn summary(&self) -> String {
        format!("{} processed, {} created", self.rows_processed, self.created)
    }
}
