use std::collections::BTreeSet;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_COUNTRY: &str = "COUNTRY";
pub const COL_YEAR: &str = "YEAR";
pub const COL_RANK: &str = "RANK";
pub const COL_ACCESS: &str = "ACCESS TO COUNTRIES";

// ---------------------------------------------------------------------------
// Errors raised while turning raw cells into records
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: YEAR value '{value}' is not an integer")]
    InvalidYear { row: usize, value: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Record – one row of the passport index
// ---------------------------------------------------------------------------

/// One (country, year, rank, access) entry.
///
/// `rank` and `access` are `None` when the source cell could not be parsed
/// as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub rank: Option<f64>,
    pub access: Option<f64>,
}

impl Record {
    pub fn new(
        country: impl Into<String>,
        year: i32,
        rank: Option<f64>,
        access: Option<f64>,
    ) -> Self {
        Self {
            country: country.into(),
            year,
            rank,
            access,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – all records in load order
// ---------------------------------------------------------------------------

/// The loaded table. Records keep the order they were read in, with any
/// backfilled rows appended at the end.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries, sorted ascending.
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct years, sorted ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Country of the first record in load order.
    pub fn first_country(&self) -> Option<&str> {
        self.records.first().map(|r| r.country.as_str())
    }

    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    /// First record matching `country` and `year` exactly.
    pub fn find(&self, country: &str, year: i32) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.year == year && r.country == country)
    }

    /// Append a record unless one for the same country and year exists.
    /// Returns `true` when the record was inserted.
    pub(crate) fn insert_if_absent(&mut self, record: Record) -> bool {
        if self.find(&record.country, record.year).is_some() {
            return false;
        }
        self.records.push(record);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            Record::new("Japan", 2018, Some(1.0), Some(190.0)),
            Record::new("Germany", 2015, Some(3.0), Some(177.0)),
            Record::new("Japan", 2015, Some(1.0), Some(186.0)),
        ])
    }

    #[test]
    fn distinct_values_are_sorted() {
        let ds = sample();
        assert_eq!(ds.countries(), vec!["Germany", "Japan"]);
        assert_eq!(ds.years(), vec![2015, 2018]);
    }

    #[test]
    fn first_country_follows_load_order() {
        let ds = sample();
        assert_eq!(ds.first_country(), Some("Japan"));
        assert_eq!(ds.max_year(), Some(2018));
    }

    #[test]
    fn insert_if_absent_keeps_existing_rows() {
        let mut ds = sample();
        assert!(!ds.insert_if_absent(Record::new("Japan", 2015, Some(9.0), None)));
        assert_eq!(ds.find("Japan", 2015).and_then(|r| r.rank), Some(1.0));

        assert!(ds.insert_if_absent(Record::new("Japan", 2016, None, None)));
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records().last().map(|r| r.year), Some(2016));
    }

    #[test]
    fn empty_dataset_has_no_defaults() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.first_country(), None);
        assert_eq!(ds.max_year(), None);
    }
}
