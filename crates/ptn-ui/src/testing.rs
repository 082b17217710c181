//! In-memory doubles for the page, the charting library and the scheduler.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use ptn_types::{ChartPayload, RowRecord};
use serde_json::json;

use crate::charts::{ChartBackend, ChartMount, PlotConfig, PreparedChart};
use crate::error::DashboardError;
use crate::lifecycle::LayoutScheduler;
use crate::view::{Display, Region, StatSlot, TableRow, View};

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Default)]
pub struct RecordingView {
    pub cards: Vec<String>,
    pub active: BTreeSet<String>,
    pub label: String,
    pub displays: HashMap<Region, Display>,
    pub scrolls: usize,
    pub stats: HashMap<StatSlot, String>,
    pub rows: Vec<TableRow>,
    pub table_clears: usize,
    pub notifications: Vec<String>,
}

impl RecordingView {
    pub fn with_cards(cards: &[&str]) -> Self {
        Self {
            cards: cards.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn active_cards(&self) -> Vec<&str> {
        self.active.iter().map(String::as_str).collect()
    }

    pub fn display(&self, region: Region) -> Display {
        self.displays.get(&region).copied().unwrap_or_default()
    }

    pub fn stat(&self, slot: StatSlot) -> &str {
        self.stats.get(&slot).map(String::as_str).unwrap_or("")
    }
}

impl View for RecordingView {
    fn clear_active_cards(&mut self) {
        self.active.clear();
    }

    fn activate_card(&mut self, ptn: &str) -> bool {
        if self.cards.iter().any(|c| c == ptn) {
            self.active.insert(ptn.to_string());
            true
        } else {
            false
        }
    }

    fn set_selected_label(&mut self, text: &str) {
        self.label = text.to_string();
    }

    fn set_display(&mut self, region: Region, display: Display) {
        self.displays.insert(region, display);
    }

    fn scroll_to_results(&mut self) {
        self.scrolls += 1;
    }

    fn set_stat(&mut self, slot: StatSlot, text: &str) {
        self.stats.insert(slot, text.to_string());
    }

    fn clear_table(&mut self) {
        self.rows.clear();
        self.table_clears += 1;
    }

    fn append_row(&mut self, row: &TableRow) {
        self.rows.push(row.clone());
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

// =============================================================================
// CHARTS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ChartCall {
    NewPlot(PreparedChart),
    Resize(ChartMount),
}

#[derive(Debug, Default)]
pub struct RecordingCharts {
    calls: RefCell<Vec<ChartCall>>,
    plot_error: Option<String>,
}

impl RecordingCharts {
    pub fn failing_plot(message: &str) -> Self {
        Self {
            plot_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<ChartCall> {
        self.calls.borrow().clone()
    }

    pub fn plotted(&self) -> Vec<PreparedChart> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                ChartCall::NewPlot(chart) => Some(chart.clone()),
                ChartCall::Resize(_) => None,
            })
            .collect()
    }

    pub fn resize_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, ChartCall::Resize(_)))
            .count()
    }
}

impl ChartBackend for RecordingCharts {
    fn new_plot(&self, chart: &PreparedChart, _config: &PlotConfig) -> Result<(), DashboardError> {
        if let Some(message) = &self.plot_error {
            return Err(DashboardError::Render(message.clone()));
        }
        self.calls.borrow_mut().push(ChartCall::NewPlot(chart.clone()));
        Ok(())
    }

    fn resize(&self, mount: ChartMount) -> Result<(), DashboardError> {
        self.calls.borrow_mut().push(ChartCall::Resize(mount));
        Ok(())
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// Holds layout tasks until the test flushes them
#[derive(Default)]
pub struct ManualScheduler {
    tasks: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run queued tasks, returning how many ran
    pub fn run_pending(&self) -> usize {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl LayoutScheduler for ManualScheduler {
    fn after_layout(&self, task: Box<dyn FnOnce()>) -> Result<(), DashboardError> {
        self.tasks.borrow_mut().push(task);
        Ok(())
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

pub fn success_payload(rows: Vec<RowRecord>) -> ChartPayload {
    let pie = json!({
        "data": [{"type": "pie", "hole": 0.3, "values": [40, 60], "labels": ["A", "B"]}],
        "layout": {"title": {"text": "Distribusi Daya Tampung"}}
    });
    let bar = json!({
        "data": [{"type": "bar", "orientation": "h", "x": [1000000, 2000000], "y": ["A", "B"]}],
        "layout": {"title": {"text": "UKT per Prodi"}, "yaxis": {"autorange": "reversed"}}
    });
    ChartPayload {
        success: true,
        error: None,
        avg_daya_tampung: Some("42".to_string()),
        avg_ukt: Some("Rp12.500.000".to_string()),
        pie_chart: Some(pie.to_string()),
        bar_chart: Some(bar.to_string()),
        table_data: rows,
    }
}

pub fn failed_payload(message: Option<&str>) -> ChartPayload {
    ChartPayload {
        success: false,
        error: message.map(str::to_string),
        ..Default::default()
    }
}
