use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashConfig;
use crate::data::aggregate::{
    FilterParams, PieData, ScatterRow, SiteSelection, compute_pie_data, compute_scatter_rows,
    scatter_title,
};
use crate::data::loader::BOOSTER_CATEGORY;
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Control events
// ---------------------------------------------------------------------------

/// A change emitted by one of the filter controls.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    SiteChanged(SiteSelection),
    PayloadRangeChanged(f64, f64),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashConfig,

    /// Shared read-only dataset.
    pub dataset: Arc<LaunchDataset>,

    /// Current dropdown / slider values.
    pub params: FilterParams,

    /// Derived views, recomputed whenever `params` change.
    pub pie: PieData,
    pub scatter_rows: Vec<ScatterRow>,
    pub scatter_title: String,

    /// Booster category colours for the scatter chart.
    pub booster_colors: ColorMap,

    /// Text typed into the site dropdown's search box.
    pub site_query: String,

    /// Whether the launch table is shown.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashConfig, dataset: Arc<LaunchDataset>) -> Self {
        let params = initial_params(&config, &dataset);
        let mut state = Self {
            booster_colors: ColorMap::new(BOOSTER_CATEGORY, dataset.booster_categories()),
            config,
            dataset,
            params,
            pie: PieData::default(),
            scatter_rows: Vec::new(),
            scatter_title: String::new(),
            site_query: String::new(),
            show_table: false,
            status_message: None,
        };
        state.recompute_pie();
        state.recompute_scatter();
        state
    }

    /// Swap in a newly loaded dataset and reset the filters to it.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.dataset = Arc::new(dataset);
        self.booster_colors = ColorMap::new(BOOSTER_CATEGORY, self.dataset.booster_categories());
        self.params = initial_params(&self.config, &self.dataset);
        self.status_message = None;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Apply a control change. The pie only depends on the site, so a
    /// payload change leaves it untouched.
    pub fn apply(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::SiteChanged(site) => {
                if site == self.params.site {
                    return;
                }
                log::info!("site selected: {}", site.value());
                self.params.site = site;
                self.recompute_pie();
                self.recompute_scatter();
            }
            FilterEvent::PayloadRangeChanged(min, max) => {
                if (min, max) == self.params.payload_range {
                    return;
                }
                self.params.payload_range = (min, max);
                self.recompute_scatter();
            }
        }
    }

    /// Dropdown options: "All Sites" followed by every site in the dataset.
    pub fn site_options(&self) -> Vec<SiteSelection> {
        std::iter::once(SiteSelection::All)
            .chain(
                self.dataset
                    .sites()
                    .iter()
                    .map(|s| SiteSelection::Site(s.clone())),
            )
            .collect()
    }

    /// Dropdown options whose label contains `site_query`, ignoring case.
    /// "All Sites" is always offered.
    pub fn matching_site_options(&self) -> Vec<SiteSelection> {
        let query = self.site_query.trim().to_lowercase();
        self.site_options()
            .into_iter()
            .filter(|opt| {
                *opt == SiteSelection::All || opt.to_string().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Slider bounds: the configured range, widened to cover the data.
    pub fn slider_range(&self) -> (f64, f64) {
        let slider = self.config.payload_slider;
        match self.dataset.payload_bounds() {
            Some((lo, hi)) => (slider.min.min(lo), slider.max.max(hi)),
            None => (slider.min, slider.max),
        }
    }

    fn recompute_pie(&mut self) {
        self.pie = compute_pie_data(&self.dataset, &self.params.site);
        log::debug!("pie for {}: {} slices", self.params.site, self.pie.labels.len());
    }

    fn recompute_scatter(&mut self) {
        let (min, max) = self.params.payload_range;
        self.scatter_rows = compute_scatter_rows(&self.dataset, &self.params.site, min, max);
        self.scatter_title = scatter_title(&self.params.site);
        log::debug!(
            "scatter for {} in {min}..={max}: {} rows",
            self.params.site,
            self.scatter_rows.len()
        );
    }
}

/// All sites over the data's payload span; an empty table falls back to
/// the configured slider bounds.
fn initial_params(config: &DashConfig, dataset: &LaunchDataset) -> FilterParams {
    let mut params = FilterParams::for_dataset(dataset);
    if dataset.is_empty() {
        params.payload_range = (config.payload_slider.min, config.payload_slider.max);
    }
    params
}
