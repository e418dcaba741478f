use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints};

use crate::data::filter::AggregatedRow;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;
const BAR_WIDTH: f64 = 0.7;

/// Placeholder shown in the central panel before a file is loaded.
pub fn empty_view(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a file to explore names  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// Top names (central panel)
// ---------------------------------------------------------------------------

/// Bar chart of the top names by total births.
/// Returns the name under the pointer when a bar is clicked.
pub fn top_names_chart(ui: &mut Ui, state: &AppState) -> Option<String> {
    let rows = &state.top_names;
    ui.heading(format!("Top {} names", state.config.top_n));

    if rows.is_empty() {
        ui.label("No names match the current filters.");
        return None;
    }

    let labels: Vec<String> = rows.iter().map(|r| r.name.clone()).collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let fill = if state.selection.contains(&r.name) {
                state.series_colors.color_for(&r.name)
            } else {
                Color32::LIGHT_BLUE
            };
            Bar::new(i as f64, r.total_births as f64)
                .name(&r.name)
                .width(BAR_WIDTH)
                .fill(fill)
        })
        .collect();

    let response = Plot::new("top_names")
        .height(CHART_HEIGHT)
        .y_axis_label("Births")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            name_at(&labels, mark.value).unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Births"));
            if plot_ui.response().clicked() {
                plot_ui.pointer_coordinate()
            } else {
                None
            }
        });

    response
        .inner
        .and_then(|p| bar_at(&state.top_names, p))
}

/// Label for an integer tick; bars sit on x = 0, 1, 2, ...
fn name_at(labels: &[String], x: f64) -> Option<String> {
    if (x - x.round()).abs() > 1e-6 || x < 0.0 {
        return None;
    }
    labels.get(x.round() as usize).cloned()
}

/// Name of the bar that contains `p`, if any. Gaps between bars, space
/// above a bar and anything below the axis hit nothing.
fn bar_at(rows: &[AggregatedRow], p: PlotPoint) -> Option<String> {
    let i = p.x.round();
    if i < 0.0 || (p.x - i).abs() > BAR_WIDTH / 2.0 {
        return None;
    }
    let row = rows.get(i as usize)?;
    (0.0..=row.total_births as f64)
        .contains(&p.y)
        .then(|| row.name.clone())
}

/// Table of the top names with their mean rank.
/// Clicking a name behaves like clicking its bar.
pub fn top_names_table(ui: &mut Ui, state: &AppState) -> Option<String> {
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(180.0)
        .column(Column::auto().at_least(30.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Total births");
            });
            header.col(|ui| {
                ui.strong("Mean rank");
            });
        })
        .body(|mut body| {
            for (i, row) in state.top_names.iter().enumerate() {
                body.row(18.0, |mut r| {
                    r.col(|ui| {
                        ui.label(format!("{}", i + 1));
                    });
                    r.col(|ui| {
                        let selected = state.selection.contains(&row.name);
                        if ui.selectable_label(selected, &row.name).clicked() {
                            clicked = Some(row.name.clone());
                        }
                    });
                    r.col(|ui| {
                        ui.label(row.total_births.to_string());
                    });
                    r.col(|ui| {
                        ui.label(row.mean_rank.to_string());
                    });
                });
            }
        });

    clicked
}

// ---------------------------------------------------------------------------
// Trends for the focused name
// ---------------------------------------------------------------------------

fn focus_title(ui: &mut Ui, title: &str, state: &AppState) -> bool {
    match &state.focused {
        Some(name) => {
            ui.heading(format!("{title}: {name} ({})", state.filter.gender.label()));
            true
        }
        None => {
            ui.heading(title);
            ui.label(RichText::new("Click a name in the top chart.").weak());
            false
        }
    }
}

/// Rank over time. Rank 1 is drawn at the top.
pub fn rank_over_time(ui: &mut Ui, state: &AppState) {
    if !focus_title(ui, "Rank over time", state) {
        return;
    }
    let points: PlotPoints = state
        .rank_trend
        .iter()
        .map(|&(year, rank)| [f64::from(year), -f64::from(rank)])
        .collect();

    Plot::new("rank_time")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Rank")
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format!("{}", (-mark.value).round() as i64)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(1.5));
        });
}

pub fn births_over_time(ui: &mut Ui, state: &AppState) {
    if !focus_title(ui, "Births over time", state) {
        return;
    }
    let points: PlotPoints = state
        .births_trend
        .iter()
        .map(|&(year, births)| [f64::from(year), births as f64])
        .collect();

    Plot::new("birth_time")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Births")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_GREEN).width(1.5));
        });
}

// ---------------------------------------------------------------------------
// Comparison of every selected name
// ---------------------------------------------------------------------------

pub fn comparison_chart(ui: &mut Ui, state: &AppState) {
    ui.heading("Compare selected names");
    if state.comparison.is_empty() {
        ui.label(RichText::new("Nothing selected yet.").weak());
    }

    Plot::new("comparison")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Births")
        .show(ui, |plot_ui| {
            for series in &state.comparison {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|&(year, births)| [f64::from(year), births as f64])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&series.name)
                        .color(state.series_colors.color_for(&series.name))
                        .width(1.5),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_labels_only_on_bars() {
        let labels = vec!["Mary".to_string(), "Anna".to_string()];
        assert_eq!(name_at(&labels, 1.0).as_deref(), Some("Anna"));
        assert_eq!(name_at(&labels, 0.5), None);
        assert_eq!(name_at(&labels, 2.0), None);
        assert_eq!(name_at(&labels, -1.0), None);
    }

    fn two_bars() -> Vec<AggregatedRow> {
        vec![
            AggregatedRow {
                name: "Mary".into(),
                total_births: 190,
                mean_rank: 2,
            },
            AggregatedRow {
                name: "Anna".into(),
                total_births: 80,
                mean_rank: 3,
            },
        ]
    }

    #[test]
    fn click_inside_bar_selects_it() {
        let rows = two_bars();
        assert_eq!(bar_at(&rows, PlotPoint::new(0.3, 150.0)).as_deref(), Some("Mary"));
        assert_eq!(bar_at(&rows, PlotPoint::new(1.0, 0.0)).as_deref(), Some("Anna"));
        assert_eq!(bar_at(&rows, PlotPoint::new(0.7, 80.0)).as_deref(), Some("Anna"));
    }

    #[test]
    fn click_outside_bars_selects_nothing() {
        let rows = two_bars();
        // past the right edge of the last bar
        assert_eq!(bar_at(&rows, PlotPoint::new(1.45, 40.0)), None);
        // gap between bars
        assert_eq!(bar_at(&rows, PlotPoint::new(0.5, 40.0)), None);
        // above a short bar
        assert_eq!(bar_at(&rows, PlotPoint::new(1.0, 100.0)), None);
        // below the axis
        assert_eq!(bar_at(&rows, PlotPoint::new(0.0, -5.0)), None);
        // left of the first bar
        assert_eq!(bar_at(&rows, PlotPoint::new(-0.8, 10.0)), None);
    }
}
