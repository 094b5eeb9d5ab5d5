use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::extraction::grid::TextGrid;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{2})/(\d{2})/(\d{4})\b").expect("date pattern is valid"));

/// The day a daily attendance report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl ReportDate {
    /// Zero-based schedule slot for this date.
    pub fn day_index(&self) -> usize {
        self.day as usize - 1
    }

    /// "MM/YYYY", the format of a roster period.
    pub fn period(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// Parse the first valid DD/MM/YYYY date found in `text`.
pub fn parse_date(text: &str) -> Option<ReportDate> {
    DATE_PATTERN.captures_iter(text).find_map(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(month, year) {
            return None;
        }
        Some(ReportDate { day, month, year })
    })
}

/// Scan the grid top to bottom, left to right, for the report date.
/// The first valid match wins.
pub fn find_report_date(grid: &TextGrid) -> Option<ReportDate> {
    grid.rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .find_map(|cell| parse_date(cell))
}

fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
