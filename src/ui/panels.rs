use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filter bar – country / year dropdowns and reset
// ---------------------------------------------------------------------------

/// Render the filter controls. Any change re-derives all three views.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Country:");
        let mut country = state.filter.country.clone();
        egui::ComboBox::from_id_salt("country_filter")
            .selected_text(&country)
            .width(160.0)
            .show_ui(ui, |ui: &mut Ui| {
                for c in &state.countries {
                    ui.selectable_value(&mut country, c.clone(), c);
                }
            });
        state.select_country(&country);

        ui.add_space(20.0);

        ui.label("Select Year:");
        let mut year = state.filter.year;
        egui::ComboBox::from_id_salt("year_filter")
            .selected_text(year.to_string())
            .width(160.0)
            .show_ui(ui, |ui: &mut Ui| {
                for &y in &state.years {
                    ui.selectable_value(&mut year, y, y.to_string());
                }
            });
        state.select_year(year);

        ui.add_space(20.0);

        if ui.button("Reset").clicked() {
            state.reset();
        }
    });
}

// ---------------------------------------------------------------------------
// Summary sentence under a chart
// ---------------------------------------------------------------------------

pub fn summary(ui: &mut Ui, text: &str) {
    ui.with_layout(Layout::top_down(Align::Center), |ui: &mut Ui| {
        ui.add(egui::Label::new(RichText::new(text).size(13.0)).wrap());
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records, {} countries, {} years",
            state.dataset.len(),
            state.countries.len(),
            state.years.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open passport index")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
