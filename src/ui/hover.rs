//! Map a pointer position (in plot coordinates) back to the chart element
//! under it, and from there to the source pair shown in the tooltip.

use crate::data::views::{BarDatum, PieView, SLICE_SHORT_LABELS};

/// Index of the line point closest to `x`, if any lies within `max_dx`.
/// Points with no value are not drawn and cannot be hovered.
pub fn nearest_point(points: &[(i32, Option<f64>)], x: f64, max_dx: f64) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, (_, v))| v.is_some())
        .map(|(i, (year, _))| (i, (*year as f64 - x).abs()))
        .filter(|(_, dx)| *dx <= max_dx)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// The bar drawn at plot argument `x` (bars sit on whole years).
pub fn bar_for_argument(bars: &[BarDatum], x: f64) -> Option<&BarDatum> {
    let year = x.round();
    bars.iter()
        .find(|b| b.year as f64 == year && b.access.is_some())
}

/// Wedge under (`x`, `y`) for a pie drawn as a unit circle at the origin.
pub fn slice_at_point(pie: &PieView, x: f64, y: f64) -> Option<usize> {
    if x * x + y * y > 1.0 {
        return None;
    }
    pie.slice_at(y.atan2(x))
}

pub fn line_tooltip(point: (i32, Option<f64>)) -> Option<String> {
    let (year, rank) = point;
    rank.map(|r| format!("Year: {year}\nRank: {}", r.trunc() as i64))
}

pub fn bar_tooltip(bar: &BarDatum) -> Option<String> {
    bar.access
        .map(|a| format!("Year: {}\nAccess: {}", bar.year, a.trunc() as i64))
}

pub fn slice_tooltip(pie: &PieView, index: usize) -> Option<String> {
    let label = SLICE_SHORT_LABELS.get(index)?;
    let value = pie.values().get(index).copied()?;
    Some(format!("{label}: {value}"))
}
