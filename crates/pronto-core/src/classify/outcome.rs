use serde::Serialize;
use std::fmt;

use crate::model::Status;

/// Why an entry cell produced no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearReason {
    /// Nothing in the cell.
    Empty,
    /// "FOLGA": scheduled day off.
    DayOff,
    /// Text that none of the rules recognize; the import leaves the slot alone.
    Unrecognized,
}

/// Result of classifying one "first entry" cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EntryClass {
    Mark(Status),
    Clear(ClearReason),
}

impl EntryClass {
    /// The slot value to write: a status, or `None` to clear the slot.
    pub fn status(self) -> Option<Status> {
        match self {
            EntryClass::Mark(status) => Some(status),
            EntryClass::Clear(_) => None,
        }
    }

    pub fn is_unrecognized(self) -> bool {
        matches!(self, EntryClass::Clear(ClearReason::Unrecognized))
    }
}

impl fmt::Display for EntryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryClass::Mark(status) => write!(f, "{status}"),
            EntryClass::Clear(ClearReason::Empty) => write!(f, "clear"),
            EntryClass::Clear(ClearReason::DayOff) => write!(f, "clear (folga)"),
            EntryClass::Clear(ClearReason::Unrecognized) => write!(f, "unrecognized"),
        }
    }
}
