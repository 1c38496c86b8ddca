use eframe::egui::{self, Color32, ColorImage, Frame, TextureHandle, TextureOptions};
use egui_extras::{Size, StripBuilder};

use crate::state::AppState;
use crate::ui::{background, charts, panels};

/// Room left under each chart for its summary sentence.
const SUMMARY_HEIGHT: f32 = 70.0;
const MIN_CHART_HEIGHT: f32 = 150.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    background: Option<TextureHandle>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState, background: Option<ColorImage>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let background = background
            .map(|img| cc.egui_ctx.load_texture("background", img, TextureOptions::LINEAR));
        Self { state, background }
    }

    /// Panels are translucent when a background is shown.
    fn panel_fill(&self, ctx: &egui::Context) -> Color32 {
        if self.background.is_some() {
            Color32::from_white_alpha(215)
        } else {
            ctx.style().visuals.panel_fill
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(texture) = &self.background {
            background::paint(ctx, texture);
        }
        let fill = self.panel_fill(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::side_top_panel(&ctx.style()).fill(fill))
            .show(ctx, |ui| {
                panels::top_bar(ui, &mut self.state);
            });

        // ---- Filter controls ----
        egui::TopBottomPanel::top("filter_bar")
            .frame(Frame::side_top_panel(&ctx.style()).fill(fill))
            .show(ctx, |ui| {
                ui.add_space(4.0);
                panels::filter_bar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ---- Central panel: three charts with their summaries ----
        let reset = self.state.take_views_changed();
        let state = &self.state;
        egui::CentralPanel::default()
            .frame(Frame::central_panel(&ctx.style()).fill(fill))
            .show(ctx, |ui| {
                let chart_height = (ui.available_height() - SUMMARY_HEIGHT).max(MIN_CHART_HEIGHT);
                StripBuilder::new(ui)
                    .sizes(Size::remainder(), 3)
                    .horizontal(|mut strip| {
                        strip.cell(|ui| {
                            charts::line_chart(ui, &state.views.line, chart_height, reset);
                            panels::summary(ui, &state.line_summary);
                        });
                        strip.cell(|ui| {
                            charts::bar_chart(ui, &state.views.bar, chart_height, reset);
                            panels::summary(ui, &state.bar_summary);
                        });
                        strip.cell(|ui| {
                            charts::pie_chart(ui, state.views.pie.as_ref(), chart_height, reset);
                            panels::summary(ui, &state.pie_summary);
                        });
                    });
            });
    }
}
