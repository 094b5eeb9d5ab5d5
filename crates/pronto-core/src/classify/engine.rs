use regex::Regex;
use std::sync::LazyLock;

use crate::classify::outcome::{ClearReason, EntryClass};
use crate::model::Status;
use crate::parsing::normalize::normalize_text;

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[01]?\d|2[0-3]):[0-5]\d\b").expect("time pattern is valid")
});

/// Keyword rules applied to the normalized cell, in priority order.
const KEYWORD_RULES: &[(&str, Status)] = &[
    ("FERIAS", Status::Vacation),
    ("FALTA", Status::Absent),
    ("LICENCA", Status::Dismissed),
    ("ATESTADO", Status::MedicalCertificate),
];

/// Classify a raw "first entry" cell. First matching rule wins:
///
/// 1. a clock time (HH:MM) anywhere in the cell -> P
/// 2. FERIAS -> FE, FALTA -> F, LICENCA -> D, ATESTADO -> AT
/// 3. empty, FOLGA, or anything else -> clear
///
/// Only this subset of the vocabulary can come out of a report; the other
/// codes are set by hand.
pub fn classify_entry(raw: &str) -> EntryClass {
    if TIME_PATTERN.is_match(raw) {
        return EntryClass::Mark(Status::Present);
    }

    let norm = normalize_text(raw);
    if let Some((_, status)) = KEYWORD_RULES.iter().find(|(kw, _)| norm.contains(*kw)) {
        return EntryClass::Mark(*status);
    }

    if norm.is_empty() {
        EntryClass::Clear(ClearReason::Empty)
    } else if norm.contains("FOLGA") {
        EntryClass::Clear(ClearReason::DayOff)
    } else {
        EntryClass::Clear(ClearReason::Unrecognized)
    }
}
