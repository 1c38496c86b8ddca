//! Pure derivations feeding the three charts.
//!
//! Each derivation takes the dataset and the current [`Filter`] and returns
//! the rows to plot plus the sentence shown under the chart. Nothing here
//! touches the UI.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::filter::{Filter, exact_row, range_rows};
use super::model::Dataset;
use crate::color::bar_color_index;

/// Number of destinations the access count is measured against.
pub const TOTAL_DESTINATIONS: i64 = 199;

/// Summary shown when the pie has no matching record.
pub const NO_DATA: &str = "No data available.";

/// Format a numeric cell the way the summaries print it: truncated to an
/// integer, or `n/a` when the cell was unparseable.
fn fmt_int(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v.trunc() as i64),
        None => "n/a".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Line: rank over time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub title: String,
    pub country: String,
    /// (year, rank) per row, ascending by year.
    pub points: Vec<(i32, Option<f64>)>,
    /// `None` when the range is empty; the label keeps its previous text.
    pub summary: Option<String>,
}

pub fn derive_line(dataset: &Dataset, filter: &Filter) -> LineView {
    let rows = range_rows(dataset, filter);
    let points: Vec<(i32, Option<f64>)> = rows.iter().map(|r| (r.year, r.rank)).collect();

    let summary = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => Some(format!(
            "{}'s rank changed from {} ({}) to {} ({}).",
            filter.country,
            fmt_int(first.rank),
            first.year,
            fmt_int(last.rank),
            last.year
        )),
        _ => None,
    };

    LineView {
        title: format!("{} Rank till {}", filter.country, filter.year),
        country: filter.country.clone(),
        points,
        summary,
    }
}

// ---------------------------------------------------------------------------
// Bar: visa-free access over time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarDatum {
    pub year: i32,
    pub access: Option<f64>,
    /// Index into the ten-colour palette.
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub title: String,
    pub bars: Vec<BarDatum>,
    pub summary: Option<String>,
}

pub fn derive_bar(dataset: &Dataset, filter: &Filter) -> BarView {
    let rows = range_rows(dataset, filter);
    let min_year = rows.iter().map(|r| r.year).min().unwrap_or(filter.year);

    let bars = rows
        .iter()
        .map(|r| BarDatum {
            year: r.year,
            access: r.access,
            color_index: bar_color_index(r.year, min_year),
        })
        .collect();

    let summary = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => Some(format!(
            "{}'s access grew from {} to {}.",
            filter.country,
            fmt_int(first.access),
            fmt_int(last.access)
        )),
        _ => None,
    };

    BarView {
        title: format!("{} Access Till {}", filter.country, filter.year),
        bars,
        summary,
    }
}

// ---------------------------------------------------------------------------
// Pie: visa-free vs visa-required for one year
// ---------------------------------------------------------------------------

pub const SLICE_LABELS: [&str; 2] = ["Visa-Free Access", "Visa Required"];
pub const SLICE_SHORT_LABELS: [&str; 2] = ["Visa-Free", "Visa Required"];

#[derive(Debug, Clone, PartialEq)]
pub struct PieView {
    pub title: String,
    pub country: String,
    pub year: i32,
    pub access: i64,
    pub no_access: i64,
}

/// One wedge of the pie. Angles are radians, measured counter-clockwise from
/// the positive x axis; `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub start: f64,
    pub end: f64,
    pub fraction: f64,
}

impl Slice {
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    fn contains(&self, angle: f64) -> bool {
        // Normalise into [start, start + TAU).
        let rel = (angle - self.start).rem_euclid(TAU);
        self.end > self.start && rel < self.end - self.start
    }
}

impl PieView {
    pub fn values(&self) -> [i64; 2] {
        [self.access, self.no_access]
    }

    pub fn summary(&self) -> String {
        format!(
            "In {}, {} visa-free and {} required for {}.",
            self.year, self.access, self.no_access, self.country
        )
    }

    /// Wedges starting at 12 o'clock, going counter-clockwise. Negative values
    /// are drawn as empty wedges.
    pub fn slices(&self) -> [Slice; 2] {
        let values = self.values().map(|v| v.max(0) as f64);
        let total: f64 = values.iter().sum();

        let mut start = FRAC_PI_2;
        values.map(|v| {
            let fraction = if total > 0.0 { v / total } else { 0.0 };
            let end = start + fraction * TAU;
            let slice = Slice {
                start,
                end,
                fraction,
            };
            start = end;
            slice
        })
    }

    /// Which wedge covers `angle` (radians, any range).
    pub fn slice_at(&self, angle: f64) -> Option<usize> {
        self.slices().iter().position(|s| s.contains(angle))
    }
}

/// `Some` iff a record exists for exactly the selected country and year and
/// its access count is known.
pub fn derive_pie(dataset: &Dataset, filter: &Filter) -> Option<PieView> {
    let record = exact_row(dataset, filter)?;
    // Keep the subtraction below in range for any parsed cell.
    let access = record.access?.trunc().clamp(0.0, f64::from(i32::MAX)) as i64;

    Some(PieView {
        title: format!("{} Visa Access in {}", filter.country, filter.year),
        country: filter.country.clone(),
        year: filter.year,
        access,
        no_access: TOTAL_DESTINATIONS - access,
    })
}

// ---------------------------------------------------------------------------
// All three together
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedViews {
    pub line: LineView,
    pub bar: BarView,
    pub pie: Option<PieView>,
}

impl DerivedViews {
    pub fn derive(dataset: &Dataset, filter: &Filter) -> Self {
        Self {
            line: derive_line(dataset, filter),
            bar: derive_bar(dataset, filter),
            pie: derive_pie(dataset, filter),
        }
    }

    pub fn pie_summary(&self) -> String {
        self.pie
            .as_ref()
            .map(PieView::summary)
            .unwrap_or_else(|| NO_DATA.to_string())
    }
}
