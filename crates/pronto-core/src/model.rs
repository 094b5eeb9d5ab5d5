use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of day slots in every schedule, one per calendar day of the month.
pub const SCHEDULE_DAYS: usize = 31;

/// Attendance status codes. The set is closed: slots hold one of these or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "T")]
    Swap,
    #[serde(rename = "D")]
    Dismissed,
    #[serde(rename = "F")]
    Absent,
    #[serde(rename = "AT")]
    MedicalCertificate,
    #[serde(rename = "FE")]
    Vacation,
    #[serde(rename = "TC")]
    Training,
    #[serde(rename = "CA")]
    AdministrativeSummons,
    #[serde(rename = "PT")]
    PaternityLeave,
    #[serde(rename = "MT")]
    MaternityLeave,
    #[serde(rename = "FP")]
    BonusVacation,
    #[serde(rename = "CJ")]
    JudicialSummons,
}

impl Status {
    pub const ALL: [Status; 12] = [
        Status::Present,
        Status::Swap,
        Status::Dismissed,
        Status::Absent,
        Status::MedicalCertificate,
        Status::Vacation,
        Status::Training,
        Status::AdministrativeSummons,
        Status::PaternityLeave,
        Status::MaternityLeave,
        Status::BonusVacation,
        Status::JudicialSummons,
    ];

    /// Short code as written in the schedule grid.
    pub fn code(self) -> &'static str {
        match self {
            Status::Present => "P",
            Status::Swap => "T",
            Status::Dismissed => "D",
            Status::Absent => "F",
            Status::MedicalCertificate => "AT",
            Status::Vacation => "FE",
            Status::Training => "TC",
            Status::AdministrativeSummons => "CA",
            Status::PaternityLeave => "PT",
            Status::MaternityLeave => "MT",
            Status::BonusVacation => "FP",
            Status::JudicialSummons => "CJ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Present => "Presença",
            Status::Swap => "Permuta",
            Status::Dismissed => "Dispensa",
            Status::Absent => "Falta",
            Status::MedicalCertificate => "Atestado",
            Status::Vacation => "Férias",
            Status::Training => "Treinamento e Capacitação",
            Status::AdministrativeSummons => "Convocação Administrativa",
            Status::PaternityLeave => "Paternidade",
            Status::MaternityLeave => "Maternidade",
            Status::BonusVacation => "Férias Prêmio",
            Status::JudicialSummons => "Convocação Judicial",
        }
    }

    /// Display color tag used by the grid and the legend.
    pub fn color(self) -> &'static str {
        match self {
            Status::Present => "emerald",
            Status::Swap => "slate",
            Status::Dismissed => "amber",
            Status::Absent => "rose",
            Status::MedicalCertificate => "sky",
            Status::Vacation => "indigo",
            Status::Training => "purple",
            Status::AdministrativeSummons => "orange",
            Status::PaternityLeave => "cyan",
            Status::MaternityLeave => "pink",
            Status::BonusVacation => "fuchsia",
            Status::JudicialSummons => "teal",
        }
    }

    /// Parse an exact status code (surrounding whitespace and case are ignored).
    pub fn from_code(code: &str) -> Option<Status> {
        let code = code.trim().to_uppercase();
        Status::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Badge number (matrícula).
    pub id: String,
    pub name: String,
    /// Sector code, e.g. "G051".
    pub sector: String,
    /// Working-hours label, informational only.
    #[serde(default)]
    pub shift: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, with = "slots")]
    pub schedule: Vec<Option<Status>>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sector: impl Into<String>) -> Self {
        Person {
            id: id.into(),
            name: name.into(),
            sector: sector.into(),
            shift: String::new(),
            rank: None,
            location: None,
            schedule: vec![None; SCHEDULE_DAYS],
        }
    }

    /// Pad the schedule with empty slots up to `SCHEDULE_DAYS`. Never truncates.
    pub fn pad_schedule(&mut self) {
        if self.schedule.len() < SCHEDULE_DAYS {
            self.schedule.resize(SCHEDULE_DAYS, None);
        }
    }

    pub fn status_on(&self, day_index: usize) -> Option<Status> {
        self.schedule.get(day_index).copied().flatten()
    }
}

/// Serde adapter for schedule slots: empty slots are `""` on disk, and
/// `""`/`null` both read back as empty.
mod slots {
    use super::Status;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        schedule: &[Option<Status>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(schedule.iter().map(|slot| slot.map(Status::code).unwrap_or("")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Option<Status>>, D::Error> {
        let raw: Vec<Option<String>> = Vec::deserialize(deserializer)?;
        raw.into_iter()
            .map(|slot| match slot.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(code) => Status::from_code(code)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("unknown status code '{code}'"))),
            })
            .collect()
    }
}
