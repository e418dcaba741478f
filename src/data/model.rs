use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender column of the dataset. The file encodes it as `M` / `F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gender '{0}', expected M or F")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::Male),
            "F" | "f" => Ok(Gender::Female),
            other => Err(ParseGenderError(other.to_string())),
        }
    }
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// NameRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One (name, gender, year) observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    pub name: String,
    pub gender: Gender,
    pub year: u16,
    /// Popularity within (year, gender); 1 is the most common name.
    pub rank: u32,
    pub births: u64,
}

impl NameRecord {
    /// First character of the name, used by the initial-letter filter.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}

/// A row that failed validation while loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("empty name")]
    EmptyName,
    #[error("rank must be at least 1")]
    ZeroRank,
    #[error("year {0} is out of range")]
    YearOutOfRange(i64),
    #[error("births must be non-negative, got {0}")]
    NegativeBirths(i64),
    #[error("rank {0} is out of range")]
    RankOutOfRange(i64),
}

// ---------------------------------------------------------------------------
// NameDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with a few pre-computed summaries for the UI.
#[derive(Debug, Clone)]
pub struct NameDataset {
    /// All records in file order. Never mutated after loading.
    pub records: Vec<NameRecord>,
    /// Earliest and latest year present, `None` for an empty dataset.
    pub year_span: Option<(u16, u16)>,
    /// Largest rank present (0 for an empty dataset).
    pub max_rank: u32,
    /// Initial letters that occur in the data.
    pub initials: BTreeSet<char>,
}

impl NameDataset {
    pub fn from_records(records: Vec<NameRecord>) -> Self {
        let mut year_span: Option<(u16, u16)> = None;
        let mut max_rank = 0;
        let mut initials = BTreeSet::new();

        for rec in &records {
            year_span = Some(match year_span {
                Some((lo, hi)) => (lo.min(rec.year), hi.max(rec.year)),
                None => (rec.year, rec.year),
            });
            max_rank = max_rank.max(rec.rank);
            if let Some(c) = rec.initial() {
                initials.insert(c);
            }
        }

        NameDataset {
            records,
            year_span,
            max_rank,
            initials,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(name: &str, gender: Gender, year: u16, births: u64, rank: u32) -> NameRecord {
        NameRecord {
            name: name.to_string(),
            gender,
            year,
            rank,
            births,
        }
    }

    /// The three-row sample used throughout the pipeline tests.
    pub fn mary_anna() -> NameDataset {
        NameDataset::from_records(vec![
            record("Mary", Gender::Female, 1880, 100, 1),
            record("Mary", Gender::Female, 1881, 90, 2),
            record("Anna", Gender::Female, 1880, 80, 3),
        ])
    }

    /// A slightly larger mixed-gender table.
    pub fn mixed() -> NameDataset {
        NameDataset::from_records(vec![
            record("John", Gender::Male, 1880, 9655, 1),
            record("William", Gender::Male, 1880, 9532, 2),
            record("James", Gender::Male, 1880, 5927, 3),
            record("Mary", Gender::Female, 1880, 7065, 1),
            record("Anna", Gender::Female, 1880, 2604, 2),
            record("Emma", Gender::Female, 1880, 2003, 3),
            record("John", Gender::Male, 1881, 8769, 1),
            record("William", Gender::Male, 1881, 8524, 2),
            record("James", Gender::Male, 1881, 5441, 3),
            record("Mary", Gender::Female, 1881, 6919, 1),
            record("Anna", Gender::Female, 1881, 2698, 2),
            record("Emma", Gender::Female, 1881, 2034, 3),
            record("Jordan", Gender::Male, 1881, 20, 4),
            record("Jordan", Gender::Female, 1881, 12, 4),
        ])
    }
}
