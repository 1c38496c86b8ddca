use crate::data::filter::Filter;
use crate::data::model::Dataset;
use crate::data::views::DerivedViews;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// `Initial` until the user first changes a filter; `Filtered` afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,
    Filtered,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub dataset: Dataset,

    /// Distinct values offered by the two dropdowns.
    pub countries: Vec<String>,
    pub years: Vec<i32>,

    /// Current selection. The only mutable copy of the filter.
    pub filter: Filter,

    /// Views derived from `dataset` and `filter`.
    pub views: DerivedViews,

    /// Summary labels under the charts. The line and bar labels keep their
    /// previous text when the selected range is empty.
    pub line_summary: String,
    pub bar_summary: String,
    pub pie_summary: String,

    pub phase: Phase,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set whenever views are re-derived so plots can reset their bounds.
    views_changed: bool,
}

impl AppState {
    /// Apply the default selection and derive all views once.
    pub fn new(dataset: Dataset) -> Self {
        let filter = default_filter(&dataset);
        let views = DerivedViews::derive(&dataset, &filter);
        let mut state = Self {
            countries: dataset.countries(),
            years: dataset.years(),
            dataset,
            filter,
            views,
            line_summary: String::new(),
            bar_summary: String::new(),
            pie_summary: String::new(),
            phase: Phase::Initial,
            status_message: None,
            views_changed: true,
        };
        state.update_summaries();
        state
    }

    /// Replace the dataset (File → Open) and start over from the defaults.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        *self = Self::new(dataset);
    }

    pub fn select_country(&mut self, country: &str) {
        if self.filter.country != country {
            self.apply(self.filter.with_country(country));
        }
    }

    pub fn select_year(&mut self, year: i32) {
        if self.filter.year != year {
            self.apply(self.filter.with_year(year));
        }
    }

    /// First country in load order, latest year in the dataset.
    pub fn reset(&mut self) {
        self.apply(default_filter(&self.dataset));
    }

    /// Whether views changed since the last call.
    pub fn take_views_changed(&mut self) -> bool {
        std::mem::take(&mut self.views_changed)
    }

    fn apply(&mut self, filter: Filter) {
        log::debug!("Filter changed to {} / {}", filter.country, filter.year);
        self.filter = filter;
        self.views = DerivedViews::derive(&self.dataset, &self.filter);
        self.phase = Phase::Filtered;
        self.views_changed = true;
        self.update_summaries();
    }

    fn update_summaries(&mut self) {
        if let Some(s) = &self.views.line.summary {
            self.line_summary = s.clone();
        }
        if let Some(s) = &self.views.bar.summary {
            self.bar_summary = s.clone();
        }
        self.pie_summary = self.views.pie_summary();
    }
}

fn default_filter(dataset: &Dataset) -> Filter {
    Filter::reset_for(dataset).unwrap_or_else(|| Filter::new(String::new(), 0))
}
