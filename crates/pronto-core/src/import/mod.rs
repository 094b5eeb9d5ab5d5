pub mod outcome;

use std::collections::HashSet;
use std::fmt;

use crate::classify::engine::classify_entry;
use crate::classify::outcome::EntryClass;
use crate::config::schema::ImportConfig;
use crate::error::ProntoError;
use crate::extraction::grid::TextGrid;
use crate::parsing::columns::locate_columns;
use crate::parsing::data_rows;
use crate::parsing::date::{find_report_date, ReportDate};
use crate::roster::matcher::{NameCandidate, NameRejection, Resolution};
use crate::roster::schedule::day_index;
use crate::roster::{ImportKind, ImportSnapshot, Roster};
use outcome::{ImportResult, RowOutcome, RowTrace};

/// Options that vary per run rather than per report family.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Collect a per-row trace in the result.
    pub trace: bool,
    /// Write this 1-based day instead of the date found in the document.
    pub day_override: Option<u32>,
    /// Label recorded in the roster's import history.
    pub source_name: Option<String>,
}

/// Steps of one import run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Idle,
    Reading,
    Extracting,
    Merging,
    Reporting,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportPhase::Idle => "idle",
            ImportPhase::Reading => "reading",
            ImportPhase::Extracting => "extracting",
            ImportPhase::Merging => "merging",
            ImportPhase::Reporting => "reporting",
        };
        f.write_str(name)
    }
}

pub(crate) fn enter_phase(phase: ImportPhase) {
    tracing::debug!(%phase, "import phase");
}

/// One data row after classification and name guarding, before any mutation.
struct PlannedRow {
    row_index: usize,
    page_number: Option<usize>,
    raw_name: String,
    raw_entry: String,
    class: EntryClass,
    candidate: Result<NameCandidate, NameRejection>,
}

/// Detect the report structure in `grid` and merge every data row into `roster`.
///
/// Date and column detection both happen before the roster is touched; if
/// either fails the roster is left exactly as it was. Row-level problems are
/// counted in the result, never raised.
pub fn import_grid(
    grid: &TextGrid,
    kind: ImportKind,
    roster: &mut Roster,
    config: &ImportConfig,
    options: &ImportOptions,
) -> Result<ImportResult, ProntoError> {
    enter_phase(ImportPhase::Extracting);

    let (report_date, target_day) = resolve_target_day(grid, options)?;
    let columns = locate_columns(grid, config)?;

    let plan: Vec<PlannedRow> = data_rows(grid, &columns)
        .into_iter()
        .map(|row| PlannedRow {
            class: classify_entry(&row.entry),
            candidate: NameCandidate::parse(&row.name, config),
            row_index: row.row_index,
            page_number: row.page_number,
            raw_name: row.name,
            raw_entry: row.entry,
        })
        .collect();

    enter_phase(ImportPhase::Merging);

    let mut result = ImportResult {
        rows_processed: 0,
        updated: 0,
        created: 0,
        skipped: 0,
        unrecognized: 0,
        target_day,
        report_date,
        columns,
        warnings: Vec::new(),
        trace: Vec::new(),
    };
    let mut updated: HashSet<usize> = HashSet::new();
    let mut created: HashSet<usize> = HashSet::new();

    for row in plan {
        let outcome = match &row.candidate {
            Err(reason) => {
                result.skipped += 1;
                tracing::debug!(row = row.row_index, name = %row.raw_name, ?reason, "row skipped");
                RowOutcome::Skipped { reason: *reason }
            }
            Ok(_) if row.class.is_unrecognized() => {
                result.unrecognized += 1;
                tracing::debug!(
                    row = row.row_index,
                    entry = %row.raw_entry,
                    "entry not recognized, row left unchanged"
                );
                RowOutcome::Unrecognized
            }
            Ok(candidate) => {
                let resolution = roster.resolve(candidate, config);
                let idx = resolution.index();
                roster.write_slot(idx, target_day, row.class.status());

                result.rows_processed += 1;
                let id = roster.persons()[idx].id.clone();
                tracing::debug!(row = row.row_index, id = %id, class = %row.class, "row merged");
                match resolution {
                    Resolution::Created(_) => {
                        created.insert(idx);
                        RowOutcome::Created { id }
                    }
                    Resolution::Matched(_) => {
                        if !created.contains(&idx) {
                            updated.insert(idx);
                        }
                        RowOutcome::Matched { id }
                    }
                }
            }
        };

        if options.trace {
            result.trace.push(RowTrace {
                row_index: row.row_index,
                page_number: row.page_number,
                raw_name: row.raw_name,
                raw_entry: row.raw_entry,
                classification: row.class,
                outcome,
            });
        }
    }

    enter_phase(ImportPhase::Reporting);

    result.updated = updated.len();
    result.created = created.len();
    result.warnings = collect_warnings(&result, roster);

    roster.record_import(ImportSnapshot {
        id: String::new(),
        kind,
        source: options.source_name.clone().unwrap_or_default(),
        report_date: result.report_date.map(|d| d.to_string()),
        day: target_day as u32 + 1,
        rows: result.rows_processed,
        created: result.created,
    });

    tracing::info!(
        day = target_day + 1,
        processed = result.rows_processed,
        updated = result.updated,
        created = result.created,
        skipped = result.skipped,
        "import finished"
    );
    enter_phase(ImportPhase::Idle);

    Ok(result)
}

fn resolve_target_day(
    grid: &TextGrid,
    options: &ImportOptions,
) -> Result<(Option<ReportDate>, usize), ProntoError> {
    if let Some(day) = options.day_override {
        return Ok((None, day_index(day)?));
    }
    let date = find_report_date(grid).ok_or(ProntoError::DateNotFound)?;
    tracing::debug!(%date, "report date found");
    Ok((Some(date), date.day_index()))
}

fn collect_warnings(result: &ImportResult, roster: &Roster) -> Vec<String> {
    let mut warnings = Vec::new();

    if result.rows_processed == 0 && result.skipped == 0 && result.unrecognized == 0 {
        warnings.push("no data rows found below the report header".to_string());
    }
    if result.skipped > 0 {
        warnings.push(format!(
            "{} row(s) skipped: name too short or not a person",
            result.skipped
        ));
    }
    if result.unrecognized > 0 {
        warnings.push(format!(
            "{} entry cell(s) not recognized; those rows were left unchanged",
            result.unrecognized
        ));
    }
    if let (Some(date), Some(period)) = (result.report_date, roster.period()) {
        if date.period() != period {
            warnings.push(format!(
                "report date {date} is outside the roster period {period}"
            ));
        }
    }

    for w in &warnings {
        tracing::warn!("{w}");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Status, SCHEDULE_DAYS};

    fn grid(rows: &[&[&str]]) -> TextGrid {
        TextGrid::from_cells(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn roster() -> Roster {
        Roster::new(vec![
            Person::new("86054-2", "DEOLINDO", "G054"),
            Person::new("87032-7", "IRAN CARLOS", "G054"),
            Person::new("315416-3", "JULIA SILVA", "G050"),
        ])
        .with_period("01/2026")
    }

    fn report() -> TextGrid {
        grid(&[
            &["RELATÓRIO DE PONTO", "Data: 08/01/2026"],
            &["FUNCIONÁRIO", "1º ENTRADA"],
            &["DEOLINDO", "07:02"],
            &["IRAN CARLOS DA SILVA", "FÉRIAS"],
            &["MARCOS LIMA", "falta"],
            &["LIA", "07:00"],
            &["Página 1 de 1", ""],
        ])
    }

    #[test]
    fn test_import_merges_and_counts() {
        let mut roster = roster();
        let result = import_grid(
            &report(),
            ImportKind::Sheet,
            &mut roster,
            &ImportConfig::default(),
            &ImportOptions::default(),
        )
        .unwrap();

        assert_eq!(result.target_day, 7);
        assert_eq!(result.rows_processed, 3);
        assert_eq!(result.updated, 2);
        assert_eq!(result.created, 1);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.summary(), "3 processed, 1 created");

        assert_eq!(roster.get("86054-2").unwrap().status_on(7), Some(Status::Present));
        assert_eq!(roster.get("87032-7").unwrap().status_on(7), Some(Status::Vacation));
        let created = roster.get("IMP-0001").unwrap();
        assert_eq!(created.name, "MARCOS LIMA");
        assert_eq!(created.status_on(7), Some(Status::Absent));
        assert_eq!(created.schedule.iter().filter(|s| s.is_some()).count(), 1);
        // "LIA" never reaches the matcher, so JULIA SILVA is untouched
        assert_eq!(roster.get("315416-3").unwrap().status_on(7), None);
        assert_eq!(roster.len(), 4);
        assert!(roster.persons().iter().all(|p| p.schedule.len() == SCHEDULE_DAYS));

        assert_eq!(roster.imports().len(), 1);
        assert_eq!(roster.imports()[0].day, 8);
        assert_eq!(roster.imports()[0].rows, 3);
    }

    #[test]
    fn test_missing_date_leaves_roster_untouched() {
        let mut roster = roster();
        let before = roster.clone();
        let g = grid(&[&["FUNCIONÁRIO", "1º ENTRADA"], &["DEOLINDO", "07:02"]]);
        let err = import_grid(
            &g,
            ImportKind::Pdf,
            &mut roster,
            &ImportConfig::default(),
            &ImportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProntoError::DateNotFound));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_missing_column_leaves_roster_untouched() {
        let mut roster = roster();
        let before = roster.clone();
        let g = grid(&[&["08/01/2026"], &["FUNCIONÁRIO", "SAÍDA"], &["NOVO NOME", "07:02"]]);
        let err = import_grid(
            &g,
            ImportKind::Pdf,
            &mut roster,
            &ImportConfig::default(),
            &ImportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ProntoError::MissingColumn { .. }));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_day_override_skips_date_detection() {
        let mut roster = roster();
        let g = grid(&[&["FUNCIONÁRIO", "1º ENTRADA"], &["DEOLINDO", "ATESTADO"]]);
        let options = ImportOptions {
            day_override: Some(31),
            ..ImportOptions::default()
        };
        let result = import_grid(
            &g,
            ImportKind::Sheet,
            &mut roster,
            &ImportConfig::default(),
            &options,
        )
        .unwrap();
        assert_eq!(result.target_day, 30);
        assert!(result.report_date.is_none());
        assert_eq!(
            roster.get("86054-2").unwrap().status_on(30),
            Some(Status::MedicalCertificate)
        );
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let config = ImportConfig::default();
        let options = ImportOptions::default();

        let mut once = roster();
        import_grid(&report(), ImportKind::Sheet, &mut once, &config, &options).unwrap();

        let mut twice = roster();
        import_grid(&report(), ImportKind::Sheet, &mut twice, &config, &options).unwrap();
        let second =
            import_grid(&report(), ImportKind::Sheet, &mut twice, &config, &options).unwrap();

        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 3);
        assert_eq!(once.persons(), twice.persons());
    }

    #[test]
    fn test_trace_and_warnings() {
        let mut roster = roster();
        let g = grid(&[
            &["Data 08/02/2026"],
            &["NOME", "1 ENTRADA"],
            &["DEOLINDO", "plantão extra"],
            &["X", ""],
        ]);
        let options = ImportOptions {
            trace: true,
            ..ImportOptions::default()
        };
        let result = import_grid(
            &g,
            ImportKind::Sheet,
            &mut roster,
            &ImportConfig::default(),
            &options,
        )
        .unwrap();

        assert_eq!(result.unrecognized, 1);
        assert_eq!(result.trace.len(), 2);
        assert_eq!(result.rows_processed, 0);
        assert_eq!(result.trace[0].outcome, RowOutcome::Unrecognized);
        assert_eq!(
            result.trace[1].outcome,
            RowOutcome::Skipped {
                reason: NameRejection::TooShort
            }
        );
        assert!(result.warnings.iter().any(|w| w.contains("not recognized")));
        assert!(result.warnings.iter().any(|w| w.contains("outside the roster period")));
    }

    #[test]
    fn test_unrecognized_entry_keeps_manual_code() {
        let mut roster = roster();
        roster.set_status("86054-2", 7, Some(Status::Training)).unwrap();
        let before_len = roster.len();
        let g = grid(&[
            &["08/01/2026"],
            &["FUNCIONÁRIO", "1º ENTRADA"],
            &["DEOLINDO", "CURSO"],
            &["MARCOS LIMA", "CURSO"],
        ]);
        let result = import_grid(
            &g,
            ImportKind::Sheet,
            &mut roster,
            &ImportConfig::default(),
            &ImportOptions::default(),
        )
        .unwrap();

        assert_eq!(result.unrecognized, 2);
        assert_eq!(result.rows_processed, 0);
        assert_eq!(result.updated, 0);
        assert_eq!(result.created, 0);
        assert_eq!(
            roster.get("86054-2").unwrap().status_on(7),
            Some(Status::Training)
        );
        // an unknown name with nothing usable is not registered
        assert_eq!(roster.len(), before_len);
    }

    #[test]
    fn test_day_off_still_clears() {
        let mut roster = roster();
        roster.set_status("86054-2", 7, Some(Status::Present)).unwrap();
        let g = grid(&[
            &["08/01/2026"],
            &["FUNCIONÁRIO", "1º ENTRADA"],
            &["DEOLINDO", "FOLGA"],
        ]);
        let result = import_grid(
            &g,
            ImportKind::Sheet,
            &mut roster,
            &ImportConfig::default(),
            &ImportOptions::default(),
        )
        .unwrap();

        assert_eq!(result.rows_processed, 1);
        assert_eq!(roster.get("86054-2").unwrap().status_on(7), None);
    }
}
