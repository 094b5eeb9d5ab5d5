use pronto_core::error::ProntoError;
use pronto_core::model::Status;
use pronto_core::roster::schedule::day_index;
use pronto_core::roster::store::{load_roster, save_roster, ImportLock};
use std::path::Path;

use crate::output;

fn parse_status(code: &str) -> Result<Status, ProntoError> {
    Status::from_code(code).ok_or_else(|| ProntoError::UnknownStatus(code.to_string()))
}

/// `clear` (any case) empties the slot.
fn parse_slot(code: &str) -> Result<Option<Status>, ProntoError> {
    if code.trim().eq_ignore_ascii_case("clear") {
        Ok(None)
    } else {
        parse_status(code).map(Some)
    }
}

pub fn set(roster_path: &Path, id: &str, day: u32, status: &str) -> Result<(), ProntoError> {
    let slot = parse_slot(status)?;
    let index = day_index(day)?;

    let _lock = ImportLock::acquire(roster_path)?;
    let mut roster = load_roster(roster_path)?;
    roster.set_status(id, index, slot)?;
    save_roster(roster_path, &roster)?;

    let shown = slot.map(|s| s.code()).unwrap_or("(empty)");
    println!("{id} day {day}: {shown}");
    Ok(())
}

pub fn apply_range(
    roster_path: &Path,
    ids: Vec<String>,
    sector: Option<String>,
    start: u32,
    end: u32,
    status: &str,
) -> Result<(), ProntoError> {
    let status = parse_status(status)?;

    let _lock = ImportLock::acquire(roster_path)?;
    let mut roster = load_roster(roster_path)?;
    let ids = match sector {
        Some(sector) => roster.ids_in_sector(&sector),
        None => ids,
    };
    if ids.is_empty() {
        println!("No persons selected.");
        return Ok(());
    }

    let outcome = roster.apply_range(&ids, start, end, status)?;
    if !outcome.updated.is_empty() {
        save_roster(roster_path, &roster)?;
    }
    output::table::print_range(&outcome, status, start, end);
    Ok(())
}

pub fn summary(roster_path: &Path, day: u32, output_format: &str) -> Result<(), ProntoError> {
    let roster = load_roster(roster_path)?;
    let summary = roster.day_summary(day)?;

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => output::table::print_summary(&summary),
    }
    Ok(())
}
