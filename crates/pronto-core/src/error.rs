use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProntoError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("unsupported input file '{0}': expected .pdf or .xlsx")]
    UnsupportedInput(String),

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("could not find a report date (DD/MM/YYYY) in the document")]
    DateNotFound,

    #[error("required column(s) not found in the report header: {}", .fields.join(", "))]
    MissingColumn { fields: Vec<&'static str> },

    #[error("invalid day range: start day {start} is after end day {end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("day {day} is outside the schedule (valid days: 1-31)")]
    DayOutOfRange { day: u32 },

    #[error("no person with id '{0}' in the roster")]
    UnknownPerson(String),

    #[error("unknown status code '{0}'")]
    UnknownStatus(String),

    #[error(
        "roster is locked by {} (written by process {}); if no other pronto run is active, delete the lock file",
        .lock.display(),
        .pid.map(|p| p.to_string()).unwrap_or_else(|| "unknown".into())
    )]
    ImportInProgress { lock: PathBuf, pid: Option<u32> },

    #[error("failed to load roster from {}: {reason}", .path.display())]
    RosterLoad { path: PathBuf, reason: String },

    #[error("failed to load config from {}: {reason}", .path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
