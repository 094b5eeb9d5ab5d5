pub mod matcher;
pub mod schedule;
pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ProntoError;
use crate::model::{Person, Status, SCHEDULE_DAYS};
use crate::parsing::normalize::normalize_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Pdf,
    Sheet,
}

/// History record of one applied import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSnapshot {
    pub id: String,
    pub kind: ImportKind,
    /// File name or other label of the imported document.
    pub source: String,
    /// Report date as DD/MM/YYYY, when the document carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    /// 1-based day of the month that was written.
    pub day: u32,
    pub rows: usize,
    pub created: usize,
}

/// Per-status headcount for one day of the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    /// 1-based day.
    pub day: u32,
    pub counts: BTreeMap<Status, usize>,
    pub empty: usize,
}

impl DaySummary {
    pub fn count(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

/// The monthly roster: every person with their schedule, plus import history.
///
/// Persons are only changed through the schedule operations and the name
/// matcher, and every schedule is kept at `SCHEDULE_DAYS` slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RosterDocument")]
pub struct Roster {
    /// Month the schedule covers, as MM/YYYY.
    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<String>,
    persons: Vec<Person>,
    imports: Vec<ImportSnapshot>,
}

/// On-disk shape of a roster; schedules may be short here, never long.
#[derive(Deserialize)]
struct RosterDocument {
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    persons: Vec<Person>,
    #[serde(default)]
    imports: Vec<ImportSnapshot>,
}

impl TryFrom<RosterDocument> for Roster {
    type Error = String;

    fn try_from(doc: RosterDocument) -> Result<Self, Self::Error> {
        if let Some(person) = doc.persons.iter().find(|p| p.schedule.len() > SCHEDULE_DAYS) {
            return Err(format!(
                "person '{}' has {} schedule slots, at most {SCHEDULE_DAYS} allowed",
                person.id,
                person.schedule.len()
            ));
        }
        let mut roster = Roster::new(doc.persons);
        roster.period = doc.period;
        roster.imports = doc.imports;
        Ok(roster)
    }
}

impl Roster {
    pub fn new(persons: Vec<Person>) -> Self {
        let mut persons = persons;
        for person in &mut persons {
            person.pad_schedule();
        }
        Roster {
            period: None,
            persons,
            imports: Vec::new(),
        }
    }

    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn period(&self) -> Option<&str> {
        self.period.as_deref()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn imports(&self) -> &[ImportSnapshot] {
        &self.imports
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.persons.iter().position(|p| p.id == id)
    }

    pub(crate) fn record_import(&mut self, mut snapshot: ImportSnapshot) {
        snapshot.id = format!("import-{:04}", self.imports.len() + 1);
        self.imports.push(snapshot);
    }

    /// Persons whose id or name contains `term`, ignoring case and accents.
    /// An empty term matches everyone.
    pub fn search(&self, term: &str) -> Vec<&Person> {
        let term = normalize_text(term);
        self.persons
            .iter()
            .filter(|p| {
                term.is_empty()
                    || normalize_text(&p.id).contains(&term)
                    || normalize_text(&p.name).contains(&term)
            })
            .collect()
    }

    /// Ids of everyone in a sector, for batch operations.
    pub fn ids_in_sector(&self, sector: &str) -> Vec<String> {
        let sector = sector.trim();
        self.persons
            .iter()
            .filter(|p| p.sector.trim().eq_ignore_ascii_case(sector))
            .map(|p| p.id.clone())
            .collect()
    }

    /// Count statuses on one (1-based) day across the roster.
    pub fn day_summary(&self, day: u32) -> Result<DaySummary, ProntoError> {
        let index = schedule::day_index(day)?;
        let mut counts = BTreeMap::new();
        let mut empty = 0;
        for person in &self.persons {
            match person.status_on(index) {
                Some(status) => *counts.entry(status).or_insert(0) += 1,
                None => empty += 1,
            }
        }
        Ok(DaySummary { day, counts, empty })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_roster() -> Roster {
        let mut gonzaga = Person::new("86999-X", "SILVA GONZAGA", "G051");
        gonzaga.shift = "19:30-07:30".into();
        let mut chaves = Person::new("99246-5", "VINÍCIUS CHAVES", "G051");
        chaves.schedule[0] = Some(Status::Present);
        let mut deolindo = Person::new("86054-2", "DEOLINDO", "G054");
        deolindo.schedule[0] = Some(Status::Absent);
        Roster::new(vec![gonzaga, chaves, deolindo])
    }

    #[test]
    fn test_loaded_schedules_are_padded() {
        let json = r#"{
            "period": "01/2026",
            "persons": [
                { "id": "1", "name": "A", "sector": "G050", "schedule": ["P", "P"] },
                { "id": "2", "name": "B", "sector": "G050" }
            ]
        }"#;
        let roster: Roster = serde_json::from_str(json).unwrap();
        assert_eq!(roster.period(), Some("01/2026"));
        assert!(roster.persons().iter().all(|p| p.schedule.len() == SCHEDULE_DAYS));
        assert_eq!(roster.persons()[0].status_on(1), Some(Status::Present));
        assert!(roster.imports().is_empty());
    }

    #[test]
    fn test_long_schedule_rejected_on_load() {
        let slots = vec!["P"; SCHEDULE_DAYS + 1];
        let json = serde_json::json!({
            "persons": [{ "id": "1", "name": "ANA PAULA", "sector": "G050", "schedule": slots }]
        });
        let err = serde_json::from_value::<Roster>(json).unwrap_err();
        assert!(err.to_string().contains("32 schedule slots"), "{err}");
    }

    #[test]
    fn test_search_ignores_case_and_accents() {
        let roster = sample_roster();
        let hits: Vec<&str> = roster.search("vinicius").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["99246-5"]);
        assert_eq!(roster.search("86054").len(), 1);
        assert_eq!(roster.search("").len(), 3);
        assert!(roster.search("nobody").is_empty());
    }

    #[test]
    fn test_ids_in_sector() {
        let roster = sample_roster();
        assert_eq!(roster.ids_in_sector("g051"), vec!["86999-X", "99246-5"]);
        assert!(roster.ids_in_sector("G999").is_empty());
    }

    #[test]
    fn test_day_summary() {
        let roster = sample_roster();
        let summary = roster.day_summary(1).unwrap();
        assert_eq!(summary.count(Status::Present), 1);
        assert_eq!(summary.count(Status::Absent), 1);
        assert_eq!(summary.count(Status::Vacation), 0);
        assert_eq!(summary.empty, 1);

        assert!(roster.day_summary(0).is_err());
        assert!(roster.day_summary(32).is_err());
    }

    #[test]
    fn test_serialized_roster_round_trips() {
        let roster = sample_roster().with_period("01/2026");
        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);
    }
}
