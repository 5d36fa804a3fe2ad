use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, FilterEvent};

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload slider. Returns the changes the
/// user made this frame; the caller applies them.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) -> Vec<FilterEvent> {
    let mut events = Vec::new();

    ui.heading("Filters");
    ui.separator();

    // ---- Launch site dropdown (searchable) ----
    ui.strong("Launch Site");
    let current = state.params.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_query)
                    .hint_text("Select a Launch Site here"),
            );
            for option in state.matching_site_options() {
                let label = option.to_string();
                if ui.selectable_label(current == option, label).clicked() {
                    events.push(FilterEvent::SiteChanged(option));
                }
            }
        });
    ui.add_space(8.0);

    // ---- Payload range slider ----
    ui.strong("Payload range (Kg):");
    let (slider_min, slider_max) = state.slider_range();
    let step = state.config.payload_slider.step;
    let (mut lo, mut hi) = state.params.payload_range;
    let lo_changed = ui
        .add(
            egui::Slider::new(&mut lo, slider_min..=slider_max)
                .step_by(step)
                .text("min"),
        )
        .changed();
    let hi_changed = ui
        .add(
            egui::Slider::new(&mut hi, slider_min..=slider_max)
                .step_by(step)
                .text("max"),
        )
        .changed();
    if lo_changed || hi_changed {
        events.push(FilterEvent::PayloadRangeChanged(lo, hi));
    }
    if ui.small_button("Reset to data range").clicked() {
        if let Some((data_lo, data_hi)) = state.dataset.payload_bounds() {
            events.push(FilterEvent::PayloadRangeChanged(data_lo, data_hi));
        }
    }
    if lo > hi {
        ui.colored_label(Color32::YELLOW, "min is above max: nothing selected");
    }

    ui.separator();

    // ---- Booster colour key ----
    ui.strong(&state.booster_colors.column);
    ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for (label, color) in state.booster_colors.legend_entries() {
                ui.label(RichText::new(format!("● {label}")).color(color));
            }
        });

    events
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
            "{} launches loaded, {} in scatter",
            state.dataset.len(),
            state.scatter_rows.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Launch Table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Launch table (bottom panel)
// ---------------------------------------------------------------------------

/// Table of the launches currently shown in the scatter chart.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.scatter_rows;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "class", "Booster Version Category"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&r.launch_site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", r.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.outcome_class.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(&r.booster_version_category)
                            .color(state.booster_colors.color_for(&r.booster_version_category)),
                    );
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Sites: {:?}", dataset.sites());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
