use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, SelectableLabel, Ui};

use crate::data::model::Gender;
use crate::selection::SelectionPhase;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Copy what we need so we can mutate state below.
    let initials = dataset.initials.clone();
    let (first_year, last_year) = dataset.year_span.unwrap_or((1880, 2020));
    let max_rank = dataset.max_rank.max(1);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Gender ----
            ui.strong("Gender");
            let mut gender = state.filter.gender;
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut gender, Gender::Male, Gender::Male.label());
                ui.radio_value(&mut gender, Gender::Female, Gender::Female.label());
            });
            state.set_gender(gender);
            ui.separator();

            // ---- Initial letters ----
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Initial letter");
                if ui.small_button("Any").clicked() {
                    state.clear_letters();
                }
            });
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for letter in 'A'..='Z' {
                    let selected = state.filter.letters.contains(&letter);
                    let label = SelectableLabel::new(selected, letter.to_string());
                    if ui.add_enabled(initials.contains(&letter), label).clicked() {
                        state.toggle_letter(letter);
                    }
                }
            });
            ui.separator();

            // ---- Years ----
            ui.strong("Years");
            let (mut lo, mut hi) = (state.filter.year_min, state.filter.year_max);
            let changed = ui
                .horizontal(|ui: &mut Ui| {
                    let a = ui.add(DragValue::new(&mut lo).range(first_year..=last_year));
                    ui.label("to");
                    let b = ui.add(DragValue::new(&mut hi).range(first_year..=last_year));
                    a.changed() || b.changed()
                })
                .inner;
            if changed {
                state.set_year_range(lo, hi);
            }

            // ---- Ranks ----
            // Numeric bounds: "from 1 to 100" keeps the hundred most popular.
            ui.strong("Rank");
            let (mut lo, mut hi) = (state.filter.rank_min, state.filter.rank_max);
            let changed = ui
                .horizontal(|ui: &mut Ui| {
                    let a = ui.add(DragValue::new(&mut lo).range(1..=max_rank));
                    ui.label("to");
                    let b = ui.add(DragValue::new(&mut hi).range(1..=max_rank));
                    a.changed() || b.changed()
                })
                .inner;
            if changed {
                state.set_rank_range(lo, hi);
            }
            ui.separator();

            // ---- Comparison selection ----
            ui.horizontal(|ui: &mut Ui| {
                ui.strong(format!("Compared names ({})", state.selection.len()));
                if ui
                    .add_enabled(!state.selection.is_empty(), egui::Button::new("Clear"))
                    .clicked()
                {
                    state.clear_selection();
                }
            });
            if state.selection.phase() == SelectionPhase::Idle {
                ui.label(RichText::new("Click a bar to add it here.").weak());
            }
            for name in state.selection.names() {
                ui.label(RichText::new(name).color(state.series_colors.color_for(name)));
            }
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

        match &state.dataset {
            Some(ds) if ds.is_empty() => {
                ui.label("Dataset has no records");
            }
            Some(ds) => {
                ui.label(format!(
                    "{} records loaded, {} matching",
                    ds.len(),
                    state.matching_count
                ));
            }
            None => {}
        }

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
        .set_title("Open name dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
