use pronto_core::extraction::grid::TextGrid;
use pronto_core::import::outcome::{ImportResult, RowOutcome};
use pronto_core::model::Status;
use pronto_core::roster::schedule::RangeOutcome;
use pronto_core::roster::DaySummary;

pub fn print_import(result: &ImportResult, dry_run: bool) {
    let date = result
        .report_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "(day given on command line)".into());
    println!("=== Import for day {} ===\n", result.target_day + 1);
    println!("  Report date:  {date}");
    println!(
        "  Columns:      name #{}, first entry #{} (header row {})",
        result.columns.name_col + 1,
        result.columns.entry_col + 1,
        result.columns.header_row + 1
    );
    println!();
    println!("  Processed:    {}", result.rows_processed);
    println!("  Updated:      {}", result.updated);
    println!("  Created:      {}", result.created);
    println!("  Skipped:      {}", result.skipped);
    if result.unrecognized > 0 {
        println!("  Unrecognized: {}", result.unrecognized);
    }
    println!();

    if !result.trace.is_empty() {
        let name_width = result
            .trace
            .iter()
            .map(|t| t.raw_name.chars().count())
            .max()
            .unwrap_or(10);

        for row in &result.trace {
            let outcome = match &row.outcome {
                RowOutcome::Matched { id } => format!("-> {id}"),
                RowOutcome::Created { id } => format!("-> {id} (new)"),
                RowOutcome::Skipped { reason } => format!("skipped ({reason:?})"),
                RowOutcome::Unrecognized => "left unchanged".to_string(),
            };
            println!(
                "  {:>4}  {:<width$}  {:<14}  {:<22}  {}",
                row.row_index + 1,
                row.raw_name,
                truncate(&row.raw_entry, 14),
                row.classification.to_string(),
                outcome,
                width = name_width
            );
        }
        println!();
    }

    for warning in &result.warnings {
        println!("  Warning: {warning}");
    }
    if !result.warnings.is_empty() {
        println!();
    }

    if dry_run {
        println!("{} (dry run, roster not saved)", result.summary());
    } else {
        println!("{}", result.summary());
    }
}

pub fn print_grid(grid: &TextGrid) {
    let mut current_page = None;
    for (i, row) in grid.rows.iter().enumerate() {
        if row.page_number.is_some() && row.page_number != current_page {
            current_page = row.page_number;
            if let Some(page) = current_page {
                println!("--- Page {page} ---");
            }
        }
        println!("{:>4}  {}", i + 1, row.cells.join(" | "));
    }
    if grid.is_empty() {
        println!("(no text found)");
    }
}

pub fn print_range(outcome: &RangeOutcome, status: Status, start: u32, end: u32) {
    println!(
        "{} ({}) applied to days {start}-{end} for {} person(s), {} slot(s) written",
        status.code(),
        status.label(),
        outcome.updated.len(),
        outcome.slots_written
    );
    for id in &outcome.missing {
        println!("  Warning: no person with id '{id}'");
    }
}

pub fn print_summary(summary: &DaySummary) {
    println!("=== Day {} ===\n", summary.day);
    for status in Status::ALL {
        let count = summary.count(status);
        if count > 0 {
            println!("  {:<4} {:<24} {:>4}", status.code(), status.label(), count);
        }
    }
    println!("  {:<4} {:<24} {:>4}", "-", "(empty)", summary.empty);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
