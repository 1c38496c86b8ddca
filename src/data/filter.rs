use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter – the selected country and year
// ---------------------------------------------------------------------------

/// The current dropdown selection. Derivations take it by reference; only the
/// application state holds a mutable copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub country: String,
    pub year: i32,
}

impl Filter {
    pub fn new(country: impl Into<String>, year: i32) -> Self {
        Self {
            country: country.into(),
            year,
        }
    }

    /// Default selection: first country in load order, latest year overall.
    pub fn reset_for(dataset: &Dataset) -> Option<Self> {
        Some(Self::new(dataset.first_country()?, dataset.max_year()?))
    }

    pub fn with_country(&self, country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            year: self.year,
        }
    }

    pub fn with_year(&self, year: i32) -> Self {
        Self {
            country: self.country.clone(),
            year,
        }
    }
}

/// Records for the selected country up to and including the selected year,
/// sorted ascending by year. Ties keep load order.
pub fn range_rows<'a>(dataset: &'a Dataset, filter: &Filter) -> Vec<&'a Record> {
    let mut rows: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| r.country == filter.country && r.year <= filter.year)
        .collect();
    rows.sort_by_key(|r| r.year);
    rows
}

/// The record for exactly the selected country and year.
pub fn exact_row<'a>(dataset: &'a Dataset, filter: &Filter) -> Option<&'a Record> {
    dataset.find(&filter.country, filter.year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new("Japan", 2018, Some(1.0), Some(190.0)),
            Record::new("Germany", 2016, Some(2.0), Some(176.0)),
            Record::new("Japan", 2015, Some(1.0), Some(186.0)),
            Record::new("Japan", 2020, Some(1.0), Some(191.0)),
            Record::new("Japan", 2016, None, Some(187.0)),
        ])
    }

    #[test]
    fn range_rows_match_country_and_upper_bound() {
        let ds = dataset();
        for country in ds.countries() {
            for year in ds.years() {
                let filter = Filter::new(country.clone(), year);
                let rows = range_rows(&ds, &filter);

                let mut expected: Vec<&Record> = ds
                    .records()
                    .iter()
                    .filter(|r| r.country == country && r.year <= year)
                    .collect();
                expected.sort_by_key(|r| r.year);

                assert_eq!(rows, expected);
                assert!(rows.windows(2).all(|w| w[0].year <= w[1].year));
            }
        }
    }

    #[test]
    fn range_rows_sorted_by_year() {
        let ds = dataset();
        let years: Vec<i32> = range_rows(&ds, &Filter::new("Japan", 2018))
            .iter()
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![2015, 2016, 2018]);
    }

    #[test]
    fn exact_row_requires_equal_year() {
        let ds = dataset();
        assert!(exact_row(&ds, &Filter::new("Japan", 2018)).is_some());
        assert!(exact_row(&ds, &Filter::new("Japan", 2017)).is_none());
        assert!(exact_row(&ds, &Filter::new("France", 2018)).is_none());
    }

    #[test]
    fn reset_uses_first_country_and_max_year() {
        let ds = dataset();
        assert_eq!(Filter::reset_for(&ds), Some(Filter::new("Japan", 2020)));
        assert_eq!(Filter::reset_for(&Dataset::default()), None);
    }

    #[test]
    fn with_helpers_copy_the_other_field() {
        let f = Filter::new("Japan", 2018);
        assert_eq!(f.with_year(2015), Filter::new("Japan", 2015));
        assert_eq!(f.with_country("Chad"), Filter::new("Chad", 2018));
    }
}
