use eframe::egui::{self, ScrollArea, Ui};

use crate::config::ViewConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NameTrendsApp {
    pub state: AppState,
}

impl NameTrendsApp {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl Default for NameTrendsApp {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl eframe::App for NameTrendsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                plot::empty_view(ui);
                return;
            }
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    let mut clicked = plot::top_names_chart(ui, &self.state);
                    if self.state.config.show_mean_rank && !self.state.top_names.is_empty() {
                        ui.add_space(6.0);
                        clicked = clicked.or(plot::top_names_table(ui, &self.state));
                    }
                    self.state.point_clicked(clicked.as_deref());

                    ui.separator();
                    ui.columns(2, |cols: &mut [Ui]| {
                        plot::rank_over_time(&mut cols[0], &self.state);
                        plot::births_over_time(&mut cols[1], &self.state);
                    });

                    ui.separator();
                    plot::comparison_chart(ui, &self.state);
                });
        });
    }
}
