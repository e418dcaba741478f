use std::path::Path;

use crate::color::SeriesColors;
use crate::config::ViewConfig;
use crate::data::filter::{AggregatedRow, FilterSpec, matching_records, top_names};
use crate::data::model::{Gender, NameDataset};
use crate::data::trend::{NameSeries, births_series, comparison_series, rank_series};
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state of one session, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<NameDataset>,

    pub config: ViewConfig,

    /// Current sidebar selections.
    pub filter: FilterSpec,

    /// Top names for the current filter (cached).
    pub top_names: Vec<AggregatedRow>,

    /// How many records passed the filter before grouping.
    pub matching_count: usize,

    /// Last clicked name, shown in the rank/births over time charts.
    pub focused: Option<String>,
    pub rank_trend: Vec<(u16, u32)>,
    pub births_trend: Vec<(u16, u64)>,

    /// Names accumulated by clicking, and their comparison series.
    pub selection: Selection,
    pub comparison: Vec<NameSeries>,
    pub series_colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            dataset: None,
            filter: FilterSpec {
                gender: config.default_gender,
                ..FilterSpec::default()
            },
            config,
            top_names: Vec::new(),
            matching_count: 0,
            focused: None,
            rank_trend: Vec::new(),
            births_trend: Vec::new(),
            selection: Selection::new(),
            comparison: Vec::new(),
            series_colors: SeriesColors::default(),
            status_message: None,
        }
    }

    /// Load `path` and ingest it, reporting failures in the status line.
    pub fn open_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset filters to span it.
    pub fn set_dataset(&mut self, dataset: NameDataset) {
        self.filter = FilterSpec::for_dataset(&dataset, self.config.default_gender);
        self.dataset = Some(dataset);
        self.focused = None;
        self.selection.clear();
        self.refilter();
        self.refresh_trends();
        self.status_message = None;
    }

    /// Recompute the top names after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.matching_count = matching_records(ds, &self.filter).count();
            self.top_names = top_names(ds, &self.filter, self.config.top_n);
        }
    }

    /// Recompute the focused-name and comparison series.
    pub fn refresh_trends(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let gender = self.filter.gender;
        match &self.focused {
            Some(name) => {
                self.rank_trend = rank_series(ds, name, gender);
                self.births_trend = births_series(ds, name, gender);
            }
            None => {
                self.rank_trend.clear();
                self.births_trend.clear();
            }
        }
        self.comparison = comparison_series(ds, self.selection.names(), gender);
        self.series_colors = SeriesColors::new(self.selection.names());
    }

    pub fn set_gender(&mut self, gender: Gender) {
        if self.filter.gender == gender {
            return;
        }
        self.filter.gender = gender;
        self.refilter();
        self.refresh_trends();
    }

    pub fn toggle_letter(&mut self, letter: char) {
        if !self.filter.letters.remove(&letter) {
            self.filter.letters.insert(letter);
        }
        self.refilter();
    }

    pub fn clear_letters(&mut self) {
        self.filter.letters.clear();
        self.refilter();
    }

    /// Inclusive year bounds. Inverted bounds are kept as given.
    pub fn set_year_range(&mut self, min: u16, max: u16) {
        self.filter.year_min = min;
        self.filter.year_max = max;
        self.refilter();
    }

    /// Inclusive rank bounds. Inverted bounds are kept as given.
    pub fn set_rank_range(&mut self, min: u32, max: u32) {
        self.filter.rank_min = min;
        self.filter.rank_max = max;
        self.refilter();
    }

    /// Handle a click on a chart point. `None` (no point under the pointer)
    /// changes nothing. Returns whether anything was updated.
    pub fn point_clicked(&mut self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            return false;
        };
        self.focused = Some(name.to_string());
        self.selection.toggle(name);
        self.refresh_trends();
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.refresh_trends();
    }
}
