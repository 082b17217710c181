//! Dashboard configuration
//!
//! Every field has a default matching the stock dashboard page, so the page
//! can pass a partial object (or nothing) to `configure()`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for API requests. Empty means same origin.
    pub api_base: String,
    pub elements: ElementIds,
    pub labels: Labels,
    pub margins: ChartMargins,
    /// Name of the `CustomEvent` dispatched on `window` when results are shown
    pub results_ready_event: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            elements: ElementIds::default(),
            labels: Labels::default(),
            margins: ChartMargins::default(),
            results_ready_event: "ptn-results-ready".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Charts endpoint for a PTN, with the name percent-encoded
    pub fn charts_url(&self, ptn: &str) -> String {
        format!(
            "{}/api/charts/{}",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(ptn)
        )
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// DOM identifiers the controller depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub card_selector: String,
    pub card_attribute: String,
    pub active_class: String,
    pub selected_label: String,
    pub results_section: String,
    pub loading: String,
    pub charts_container: String,
    pub stats_summary: String,
    pub avg_capacity: String,
    pub avg_fee: String,
    pub table_body: String,
    pub pie_chart: String,
    pub bar_chart: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            card_selector: ".ptn-card".to_string(),
            card_attribute: "data-ptn".to_string(),
            active_class: "active".to_string(),
            selected_label: "selected-ptn-display".to_string(),
            results_section: "interactive-section".to_string(),
            loading: "loading".to_string(),
            charts_container: "charts-container".to_string(),
            stats_summary: "ptn-stats-summary".to_string(),
            avg_capacity: "avg-daya-tampung".to_string(),
            avg_fee: "avg-ukt".to_string(),
            table_body: "table-body".to_string(),
            pie_chart: "pie-chart".to_string(),
            bar_chart: "bar-chart".to_string(),
        }
    }
}

impl ElementIds {
    /// Ids that must exist in the page for the controller to work
    pub fn required(&self) -> [&str; 10] {
        [
            self.selected_label.as_str(),
            self.results_section.as_str(),
            self.loading.as_str(),
            self.charts_container.as_str(),
            self.stats_summary.as_str(),
            self.avg_capacity.as_str(),
            self.avg_fee.as_str(),
            self.table_body.as_str(),
            self.pie_chart.as_str(),
            self.bar_chart.as_str(),
        ]
    }
}

/// User-facing text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub selected_prefix: String,
    pub not_available: String,
    pub error_prefix: String,
    /// Shown for transport, decode and render failures
    pub load_failed: String,
    /// Shown when the server fails without a message
    pub no_data: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            selected_prefix: "Selected: ".to_string(),
            not_available: "N/A".to_string(),
            error_prefix: "An error occurred: ".to_string(),
            load_failed: "Failed to load data".to_string(),
            no_data: "No data".to_string(),
        }
    }
}

/// Plot margin in pixels, serialized in Plotly's `{l, r, t, b}` shape.
/// Sides left out of a config object stay at 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Margin {
    pub const fn uniform(px: u32) -> Self {
        Self {
            l: px,
            r: px,
            t: px,
            b: px,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(50)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartMargins {
    pub pie: Margin,
    /// Left margin is wide so long programme names fit
    pub bar: Margin,
}

impl Default for ChartMargins {
    fn default() -> Self {
        Self {
            pie: Margin::uniform(50),
            bar: Margin {
                l: 200,
                ..Margin::uniform(50)
            },
        }
    }
}
