use serde::Serialize;

use crate::config::schema::ImportConfig;
use crate::model::Person;
use crate::parsing::normalize::{clean_name, normalize_text, significant_len};
use crate::roster::Roster;

/// Why a name cell was not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameRejection {
    /// Fewer significant characters than `min_name_len`.
    TooShort,
    /// Looks like report furniture: a footer, a repeated header, a date line.
    Metadata,
}

/// A name cell that passed the length and metadata guards.
#[derive(Debug, Clone, PartialEq)]
pub struct NameCandidate {
    /// Uppercased, whitespace-collapsed; kept for display and new entries.
    pub display: String,
    pub normalized: String,
}

impl NameCandidate {
    /// Guard a raw name cell before any roster lookup.
    pub fn parse(raw: &str, config: &ImportConfig) -> Result<NameCandidate, NameRejection> {
        let normalized = normalize_text(raw);
        if significant_len(&normalized) < config.min_name_len {
            return Err(NameRejection::TooShort);
        }
        if looks_like_metadata(raw, &normalized, &config.metadata_markers) {
            return Err(NameRejection::Metadata);
        }
        Ok(NameCandidate {
            display: clean_name(raw),
            normalized,
        })
    }
}

fn looks_like_metadata(raw: &str, normalized: &str, markers: &[String]) -> bool {
    if raw.contains(':') || !normalized.chars().any(char::is_alphabetic) {
        return true;
    }
    markers.iter().any(|marker| {
        let marker = normalize_text(marker);
        !marker.is_empty() && normalized.split(' ').any(|word| word == marker)
    })
}

/// How a candidate name was resolved against the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(usize),
    Created(usize),
}

impl Resolution {
    pub fn index(self) -> usize {
        match self {
            Resolution::Matched(idx) | Resolution::Created(idx) => idx,
        }
    }
}

impl Roster {
    /// First person whose normalized name contains the candidate or is
    /// contained in it. Persons without a usable name never match.
    pub fn find_match(&self, candidate: &NameCandidate) -> Option<usize> {
        self.persons.iter().position(|person| {
            let stored = normalize_text(&person.name);
            !stored.is_empty()
                && (candidate.normalized.contains(&stored) || stored.contains(&candidate.normalized))
        })
    }

    /// Add a person for a name the report has but the roster does not.
    pub fn register_imported(&mut self, candidate: &NameCandidate, config: &ImportConfig) -> usize {
        let id = self.next_imported_id(&config.imported_id_prefix);
        tracing::info!(id = %id, name = %candidate.display, "registering person from import");
        self.persons.push(Person::new(
            id,
            candidate.display.clone(),
            config.imported_sector.clone(),
        ));
        self.persons.len() - 1
    }

    /// Match the candidate, or register it when nothing matches.
    pub fn resolve(&mut self, candidate: &NameCandidate, config: &ImportConfig) -> Resolution {
        match self.find_match(candidate) {
            Some(idx) => Resolution::Matched(idx),
            None => Resolution::Created(self.register_imported(candidate, config)),
        }
    }

    fn next_imported_id(&self, prefix: &str) -> String {
        let mut n = self.persons.iter().filter(|p| p.id.starts_with(prefix)).count() + 1;
        loop {
            let id = format!("{prefix}{n:04}");
            if self.index_of(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }
}
