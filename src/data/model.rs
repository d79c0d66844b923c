use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// RemoteStatus – derived from the remote ratio
// ---------------------------------------------------------------------------

/// Where the job is performed, derived from `remote_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RemoteStatus {
    Remote,
    InPerson,
    Hybrid,
}

impl RemoteStatus {
    /// 100 → Remote, 0 → In-Person, anything else (NaN included) → Hybrid.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio == 100.0 {
            RemoteStatus::Remote
        } else if ratio == 0.0 {
            RemoteStatus::InPerson
        } else {
            RemoteStatus::Hybrid
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RemoteStatus::Remote => "Remote",
            RemoteStatus::InPerson => "In-Person",
            RemoteStatus::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ExperienceLevel – readable label for the experience code
// ---------------------------------------------------------------------------

/// Experience level mapped from the dataset's two-letter code.
/// Unknown codes are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperienceLevel {
    Executive,
    Senior,
    Mid,
    Entry,
    Other(String),
}

impl ExperienceLevel {
    pub fn from_code(code: &str) -> Self {
        match code {
            "EN" => ExperienceLevel::Entry,
            "MI" => ExperienceLevel::Mid,
            "SE" => ExperienceLevel::Senior,
            "EX" => ExperienceLevel::Executive,
            other => ExperienceLevel::Other(other.to_string()),
        }
    }

    /// Axis rank: most senior first, unmapped codes last.
    pub fn rank(&self) -> u8 {
        match self {
            ExperienceLevel::Executive => 0,
            ExperienceLevel::Senior => 1,
            ExperienceLevel::Mid => 2,
            ExperienceLevel::Entry => 3,
            ExperienceLevel::Other(_) => 4,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ExperienceLevel::Executive => "Executive",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Mid => "Mid-Level",
            ExperienceLevel::Entry => "Entry-Level",
            ExperienceLevel::Other(code) => code,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawRow – one untyped row as read from disk
// ---------------------------------------------------------------------------

/// A row exactly as it appears in the source file: every cell is text.
///
/// The columns that drive the dashboard are required; the descriptive ones
/// default to empty so slimmer exports still load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    pub work_year: String,
    pub experience_level: String,
    #[serde(default)]
    pub employment_type: String,
    pub job_title: String,
    pub salary: String,
    #[serde(default)]
    pub salary_currency: String,
    pub salary_in_usd: String,
    #[serde(default)]
    pub employee_residence: String,
    pub remote_ratio: String,
    #[serde(default)]
    pub company_location: String,
    #[serde(default)]
    pub company_size: String,
}

// ---------------------------------------------------------------------------
// Record – one normalized compensation observation
// ---------------------------------------------------------------------------

/// A typed, immutable record. Numeric cells that fail to parse are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub work_year: f64,
    pub salary: f64,
    pub salary_in_usd: f64,
    pub job_title: String,
    pub experience_code: String,
    pub experience: ExperienceLevel,
    pub remote_ratio: f64,
    pub remote_status: RemoteStatus,
    pub employment_type: String,
    pub salary_currency: String,
    pub employee_residence: String,
    pub company_location: String,
    pub company_size: String,
}

impl Record {
    /// Normalize a raw row: parse numerics, derive status and level.
    pub fn from_raw(raw: RawRow) -> Self {
        let remote_ratio = parse_number(&raw.remote_ratio);
        let experience_code = raw.experience_level.trim().to_string();
        Record {
            work_year: parse_number(&raw.work_year),
            salary: parse_number(&raw.salary),
            salary_in_usd: parse_number(&raw.salary_in_usd),
            job_title: raw.job_title.trim().to_string(),
            experience: ExperienceLevel::from_code(&experience_code),
            experience_code,
            remote_ratio,
            remote_status: RemoteStatus::from_ratio(remote_ratio),
            employment_type: raw.employment_type.trim().to_string(),
            salary_currency: raw.salary_currency.trim().to_string(),
            employee_residence: raw.employee_residence.trim().to_string(),
            company_location: raw.company_location.trim().to_string(),
            company_size: raw.company_size.trim().to_string(),
        }
    }

    /// Whether the USD salary can take part in numeric aggregates.
    pub fn has_valid_salary(&self) -> bool {
        self.salary_in_usd.is_finite()
    }
}

/// Parse a numeric cell; empty or malformed text becomes `NaN`.
pub fn parse_number(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All normalized records in file order.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    pub records: Vec<Record>,
}

impl SalaryDataset {
    pub fn from_raw_rows(rows: Vec<RawRow>) -> Self {
        SalaryDataset {
            records: rows.into_iter().map(Record::from_raw).collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records whose USD salary could not be parsed.
    pub fn invalid_salary_count(&self) -> usize {
        self.records.iter().filter(|r| !r.has_valid_salary()).count()
    }
}

#[cfg(test)]
pub(crate) fn raw(title: &str, level: &str, usd: &str, remote: &str) -> RawRow {
    RawRow {
        work_year: "2023".into(),
        experience_level: level.into(),
        job_title: title.into(),
        salary: usd.into(),
        salary_in_usd: usd.into(),
        remote_ratio: remote.into(),
        ..RawRow::default()
    }
}
