use serde::Serialize;
use std::collections::HashSet;

use crate::error::ProntoError;
use crate::model::{Status, SCHEDULE_DAYS};
use crate::roster::Roster;

/// What a batch range operation touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeOutcome {
    /// Ids whose schedules were written, in selection order.
    pub updated: Vec<String>,
    /// Selected ids that are not in the roster.
    pub missing: Vec<String>,
    pub slots_written: usize,
}

/// Convert a 1-based day of the month into a schedule index.
pub fn day_index(day: u32) -> Result<usize, ProntoError> {
    if day == 0 || day as usize > SCHEDULE_DAYS {
        return Err(ProntoError::DayOutOfRange { day });
    }
    Ok(day as usize - 1)
}

impl Roster {
    /// Overwrite one slot of one person's schedule. `day_index` is 0-based;
    /// `None` clears the slot. Setting the same value twice is a no-op.
    pub fn set_status(
        &mut self,
        id: &str,
        day_index: usize,
        status: Option<Status>,
    ) -> Result<(), ProntoError> {
        if day_index >= SCHEDULE_DAYS {
            return Err(ProntoError::DayOutOfRange {
                day: day_index as u32 + 1,
            });
        }
        let person_idx = self
            .index_of(id)
            .ok_or_else(|| ProntoError::UnknownPerson(id.to_string()))?;
        self.write_slot(person_idx, day_index, status);
        Ok(())
    }

    /// Write `status` on days `start_day..=end_day` (1-based) for every selected person.
    ///
    /// The range is checked before anything is written: a reversed or
    /// out-of-month range changes nothing. Unknown ids are reported in the
    /// outcome and do not stop the others.
    pub fn apply_range(
        &mut self,
        ids: &[String],
        start_day: u32,
        end_day: u32,
        status: Status,
    ) -> Result<RangeOutcome, ProntoError> {
        if start_day > end_day {
            return Err(ProntoError::InvalidRange {
                start: start_day,
                end: end_day,
            });
        }
        let first = day_index(start_day)?;
        let last = day_index(end_day)?;

        let mut outcome = RangeOutcome::default();
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            match self.index_of(id) {
                Some(person_idx) => {
                    for day in first..=last {
                        self.write_slot(person_idx, day, Some(status));
                    }
                    outcome.slots_written += last - first + 1;
                    outcome.updated.push(id.clone());
                }
                None => outcome.missing.push(id.clone()),
            }
        }

        tracing::debug!(
            status = %status,
            start_day,
            end_day,
            updated = outcome.updated.len(),
            missing = outcome.missing.len(),
            "applied status range"
        );
        Ok(outcome)
    }

    /// Pad then overwrite. Callers have already checked both indices.
    pub(crate) fn write_slot(&mut self, person_idx: usize, day_index: usize, status: Option<Status>) {
        let person = &mut self.persons[person_idx];
        person.pad_schedule();
        person.schedule[day_index] = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::sample_roster;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_status_is_idempotent() {
        let mut once = sample_roster();
        once.set_status("86054-2", 4, Some(Status::Vacation)).unwrap();

        let mut twice = sample_roster();
        twice.set_status("86054-2", 4, Some(Status::Vacation)).unwrap();
        twice.set_status("86054-2", 4, Some(Status::Vacation)).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.get("86054-2").unwrap().status_on(4), Some(Status::Vacation));
    }

    #[test]
    fn test_set_status_clears() {
        let mut roster = sample_roster();
        roster.set_status("86054-2", 0, None).unwrap();
        assert_eq!(roster.get("86054-2").unwrap().status_on(0), None);
    }

    #[test]
    fn test_set_status_pads_short_schedule() {
        let mut roster = sample_roster();
        roster.persons[0].schedule.truncate(3);
        roster.set_status("86999-X", 30, Some(Status::Present)).unwrap();
        let person = roster.get("86999-X").unwrap();
        assert_eq!(person.schedule.len(), SCHEDULE_DAYS);
        assert_eq!(person.status_on(30), Some(Status::Present));
        assert_eq!(person.status_on(10), None);
    }

    #[test]
    fn test_set_status_rejects_bad_input() {
        let mut roster = sample_roster();
        assert!(matches!(
            roster.set_status("86054-2", 31, Some(Status::Present)),
            Err(ProntoError::DayOutOfRange { day: 32 })
        ));
        assert!(matches!(
            roster.set_status("nobody", 0, Some(Status::Present)),
            Err(ProntoError::UnknownPerson(_))
        ));
    }

    #[test]
    fn test_apply_range_writes_inclusive_days() {
        let mut roster = sample_roster();
        let outcome = roster
            .apply_range(&ids(&["86999-X", "99246-5"]), 3, 5, Status::Vacation)
            .unwrap();
        assert_eq!(outcome.updated, ids(&["86999-X", "99246-5"]));
        assert_eq!(outcome.slots_written, 6);

        let p = roster.get("99246-5").unwrap();
        assert_eq!(p.status_on(1), None);
        assert_eq!(p.status_on(2), Some(Status::Vacation));
        assert_eq!(p.status_on(4), Some(Status::Vacation));
        assert_eq!(p.status_on(5), None);
        assert_eq!(p.status_on(0), Some(Status::Present));
        assert!(roster.persons().iter().all(|p| p.schedule.len() == SCHEDULE_DAYS));
    }

    #[test]
    fn test_apply_range_reversed_is_refused() {
        let mut roster = sample_roster();
        let before = roster.clone();
        let err = roster
            .apply_range(&ids(&["86999-X"]), 10, 5, Status::Training)
            .unwrap_err();
        assert!(matches!(err, ProntoError::InvalidRange { start: 10, end: 5 }));
        assert_eq!(roster, before);
    }

    #[test]
    fn test_apply_range_out_of_month_is_refused() {
        let mut roster = sample_roster();
        let before = roster.clone();
        assert!(roster
            .apply_range(&ids(&["86999-X"]), 30, 32, Status::Training)
            .is_err());
        assert!(roster
            .apply_range(&ids(&["86999-X"]), 0, 2, Status::Training)
            .is_err());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_apply_range_reports_missing_ids() {
        let mut roster = sample_roster();
        let outcome = roster
            .apply_range(&ids(&["ghost", "86054-2", "86054-2"]), 31, 31, Status::Present)
            .unwrap();
        assert_eq!(outcome.updated, ids(&["86054-2"]));
        assert_eq!(outcome.missing, ids(&["ghost"]));
        assert_eq!(outcome.slots_written, 1);
    }

    #[test]
    fn test_day_index_bounds() {
        assert_eq!(day_index(1).unwrap(), 0);
        assert_eq!(day_index(31).unwrap(), 30);
        assert!(day_index(0).is_err());
        assert!(day_index(32).is_err());
    }
}
