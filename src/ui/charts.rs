use std::f64::consts::FRAC_PI_2;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, Points, Polygon, Text,
};

use crate::color::{TAB10, highlight, palette_color, to_color32};
use crate::data::views::{BarView, LineView, NO_DATA, PieView, SLICE_LABELS, Slice};
use crate::ui::hover;

const BAR_WIDTH: f64 = 0.8;
/// How far (in years) the pointer may be from a line marker and still hover it.
const HOVER_YEARS: f64 = 0.5;
/// Radius at which the percentage labels sit inside the pie.
const LABEL_RADIUS: f64 = 0.6;

/// Axis labels only on whole years.
fn year_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.value.fract() == 0.0 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}

/// Ranks are plotted negated so that rank 1 sits at the top.
fn rank_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.value.fract() == 0.0 {
        format!("{:.0}", -mark.value)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Line chart – rank over time
// ---------------------------------------------------------------------------

/// Split the (year, rank) series at missing ranks so the line breaks there
/// instead of joining across the gap. Ranks are negated for plotting.
pub fn rank_runs(points: &[(i32, Option<f64>)]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &(year, rank) in points {
        match rank {
            Some(r) => current.push([year as f64, -r]),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub fn line_chart(ui: &mut Ui, view: &LineView, height: f32, reset: bool) {
    ui.label(RichText::new(&view.title).strong());

    let runs = rank_runs(&view.points);
    let color = palette_color(0);

    let mut plot = Plot::new("line_chart")
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Rank")
        .x_axis_formatter(year_axis)
        .y_axis_formatter(rank_axis);
    if reset {
        plot = plot.reset();
    }

    let response = plot.show(ui, |plot_ui| {
        // Runs share a name, so the legend shows a single entry.
        for run in &runs {
            plot_ui.line(
                Line::new(run.clone())
                    .name(&view.country)
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(Points::new(run.clone()).radius(4.0).color(color));
        }

        let hovered = plot_ui
            .pointer_coordinate()
            .and_then(|p| hover::nearest_point(&view.points, p.x, HOVER_YEARS));
        if let Some(&(year, Some(rank))) = hovered.and_then(|i| view.points.get(i)) {
            plot_ui.points(
                Points::new(vec![[year as f64, -rank]])
                    .radius(6.0)
                    .color(highlight(color)),
            );
        }
        hovered
    });

    if let Some(text) = response
        .inner
        .and_then(|i| view.points.get(i).copied())
        .and_then(hover::line_tooltip)
    {
        response.response.on_hover_text_at_pointer(text);
    }
}

// ---------------------------------------------------------------------------
// Bar chart – visa-free access over time
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, view: &BarView, height: f32, reset: bool) {
    ui.label(RichText::new(&view.title).strong());

    let bars: Vec<Bar> = view
        .bars
        .iter()
        .filter_map(|b| {
            let access = b.access?;
            Some(
                Bar::new(b.year as f64, access)
                    .width(BAR_WIDTH)
                    .fill(palette_color(b.color_index))
                    .name(b.year),
            )
        })
        .collect();

    // The formatter outlives this frame's borrow of the view.
    let source = view.bars.clone();
    let chart = BarChart::new(bars).element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
        hover::bar_for_argument(&source, bar.argument)
            .and_then(hover::bar_tooltip)
            .unwrap_or_default()
    }));

    let mut plot = Plot::new("bar_chart")
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .x_axis_label("Year")
        .y_axis_label("Visa-Free Access")
        .x_axis_formatter(year_axis)
        .include_y(0.0);
    if reset {
        plot = plot.reset();
    }

    plot.show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Pie chart – visa-free vs visa-required for one year
// ---------------------------------------------------------------------------

/// Split a wedge into pieces no wider than a quarter turn so each polygon is
/// convex. Each piece is the centre followed by points along the arc.
pub fn wedge_polygons(slice: &Slice, arc_step: f64) -> Vec<Vec<[f64; 2]>> {
    let sweep = slice.end - slice.start;
    if sweep <= 0.0 {
        return Vec::new();
    }
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;
    let steps = (piece_sweep / arc_step).ceil().max(1.0) as usize;

    (0..pieces)
        .map(|p| {
            let start = slice.start + p as f64 * piece_sweep;
            let mut points = Vec::with_capacity(steps + 2);
            points.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = start + piece_sweep * s as f64 / steps as f64;
                points.push([a.cos(), a.sin()]);
            }
            points
        })
        .collect()
}

pub fn pie_chart(ui: &mut Ui, view: Option<&PieView>, height: f32, reset: bool) {
    let Some(pie) = view else {
        ui.label("");
        ui.allocate_ui([ui.available_width(), height].into(), |ui| {
            ui.centered_and_justified(|ui| ui.label(NO_DATA));
        });
        return;
    };

    ui.label(RichText::new(&pie.title).strong());
    let colors: [Color32; 2] = [to_color32(TAB10[0]), to_color32(TAB10[1])];

    let mut plot = Plot::new("pie_chart")
        .height(height)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2);
    if reset {
        plot = plot.reset();
    }

    let response = plot.show(ui, |plot_ui| {
        let hovered = plot_ui
            .pointer_coordinate()
            .and_then(|p| hover::slice_at_point(pie, p.x, p.y));

        for (i, slice) in pie.slices().iter().enumerate() {
            let fill = if hovered == Some(i) {
                highlight(colors[i])
            } else {
                colors[i]
            };
            for piece in wedge_polygons(slice, 0.05) {
                plot_ui.polygon(
                    Polygon::new(piece)
                        .fill_color(fill)
                        .stroke(Stroke::new(1.0, fill))
                        .name(SLICE_LABELS[i]),
                );
            }
            if slice.fraction > 0.0 {
                let mid = slice.mid_angle();
                plot_ui.text(Text::new(
                    PlotPoint::new(LABEL_RADIUS * mid.cos(), LABEL_RADIUS * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        }
        hovered
    });

    if let Some(text) = response
        .inner
        .and_then(|i| hover::slice_tooltip(pie, i))
    {
        response.response.on_hover_text_at_pointer(text);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;

    #[test]
    fn wedges_are_split_into_quarter_turns() {
        let slice = Slice {
            start: FRAC_PI_2,
            end: FRAC_PI_2 + 0.9 * TAU,
            fraction: 0.9,
        };
        let polys = wedge_polygons(&slice, 0.05);
        assert_eq!(polys.len(), 4);
        for poly in &polys {
            assert_eq!(poly[0], [0.0, 0.0]);
            for p in &poly[1..] {
                let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
                assert!((r - 1.0).abs() < 1e-9);
            }
        }
        // The first arc point is the wedge start: straight up.
        let first = polys[0][1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_ranks_break_the_line() {
        let points = [
            (2015, Some(1.0)),
            (2016, Some(2.0)),
            (2017, None),
            (2018, Some(3.0)),
            (2019, None),
        ];
        assert_eq!(
            rank_runs(&points),
            vec![vec![[2015.0, -1.0], [2016.0, -2.0]], vec![[2018.0, -3.0]]]
        );
        assert!(rank_runs(&[(2015, None)]).is_empty());
    }

    #[test]
    fn empty_wedge_has_no_polygons() {
        let slice = Slice {
            start: 1.0,
            end: 1.0,
            fraction: 0.0,
        };
        assert!(wedge_polygons(&slice, 0.05).is_empty());
    }

    #[test]
    fn axis_labels_only_on_whole_years() {
        let mark = |value| GridMark {
            value,
            step_size: 0.5,
        };
        assert_eq!(year_axis(mark(2015.0), &(2010.0..=2020.0)), "2015");
        assert_eq!(year_axis(mark(2015.5), &(2010.0..=2020.0)), "");
        assert_eq!(rank_axis(mark(-3.0), &(-10.0..=0.0)), "3");
    }
}
