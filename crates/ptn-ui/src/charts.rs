//! Chart rendering
//!
//! Decodes the two chart specs of a payload, merges the dashboard's layout
//! overrides over the server layout, and hands the result to a
//! [`ChartBackend`] (Plotly in the browser).

use ptn_types::{ChartPayload, ChartSpec};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{ChartMargins, Margin};
use crate::error::DashboardError;

/// Fixed chart mount points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartMount {
    Pie,
    Bar,
}

impl ChartMount {
    pub const ALL: [ChartMount; 2] = [ChartMount::Pie, ChartMount::Bar];

    /// Payload field carrying this chart's spec
    pub fn payload_field(&self) -> &'static str {
        match self {
            ChartMount::Pie => "pie_chart",
            ChartMount::Bar => "bar_chart",
        }
    }
}

/// Plotly config object (third `newPlot` argument)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlotConfig {
    pub responsive: bool,
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            display_mode_bar: false,
        }
    }
}

/// A chart ready to plot: traces plus the merged layout
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedChart {
    pub mount: ChartMount,
    pub data: Vec<Value>,
    pub layout: Map<String, Value>,
}

/// Charting library operations.
///
/// Takes `&self` so the backend can be shared with deferred resize tasks.
pub trait ChartBackend {
    fn new_plot(&self, chart: &PreparedChart, config: &PlotConfig) -> Result<(), DashboardError>;

    fn resize(&self, mount: ChartMount) -> Result<(), DashboardError>;
}

/// New layout = server layout + autosize + margin. The server layout is
/// left as it was.
pub fn merge_layout(server: &Map<String, Value>, margin: Margin) -> Map<String, Value> {
    let mut layout = server.clone();
    layout.insert("autosize".to_string(), Value::Bool(true));
    layout.insert(
        "margin".to_string(),
        serde_json::json!({ "l": margin.l, "r": margin.r, "t": margin.t, "b": margin.b }),
    );
    layout
}

fn parse_spec(mount: ChartMount, raw: Option<&str>) -> Result<ChartSpec, DashboardError> {
    let field = mount.payload_field();
    let raw = raw
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| DashboardError::Render(format!("{} is empty", field)))?;
    ChartSpec::parse(raw).map_err(|e| DashboardError::Render(format!("{}: {}", field, e)))
}

/// Decode both chart specs and apply layout overrides.
///
/// Fails before anything is plotted if either spec is unusable.
pub fn prepare_charts(
    payload: &ChartPayload,
    margins: &ChartMargins,
) -> Result<Vec<PreparedChart>, DashboardError> {
    ChartMount::ALL
        .iter()
        .map(|&mount| {
            let (raw, margin) = match mount {
                ChartMount::Pie => (payload.pie_chart.as_deref(), margins.pie),
                ChartMount::Bar => (payload.bar_chart.as_deref(), margins.bar),
            };
            let spec = parse_spec(mount, raw)?;
            tracing::debug!(
                mount = ?mount,
                title = spec.title().unwrap_or_default(),
                traces = spec.data.len(),
                "chart spec decoded"
            );
            Ok(PreparedChart {
                mount,
                layout: merge_layout(&spec.layout, margin),
                data: spec.data,
            })
        })
        .collect()
}

pub fn plot_charts<C: ChartBackend + ?Sized>(
    backend: &C,
    charts: &[PreparedChart],
) -> Result<(), DashboardError> {
    let config = PlotConfig::default();
    for chart in charts {
        backend.new_plot(chart, &config)?;
        tracing::debug!(mount = ?chart.mount, traces = chart.data.len(), "chart plotted");
    }
    Ok(())
}

/// Decode and plot both charts of a payload
pub fn render_charts<C: ChartBackend + ?Sized>(
    backend: &C,
    payload: &ChartPayload,
    margins: &ChartMargins,
) -> Result<(), DashboardError> {
    let charts = prepare_charts(payload, margins)?;
    plot_charts(backend, &charts)
}

/// Recompute both charts' size from their containers. Failures are logged.
pub fn resize_all<C: ChartBackend + ?Sized>(backend: &C) {
    for mount in ChartMount::ALL {
        if let Err(e) = backend.resize(mount) {
            tracing::warn!(?mount, error = %e, "chart resize failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ChartCall, RecordingCharts};
    use serde_json::json;

    fn spec(title: &str) -> String {
        json!({
            "data": [{"type": "bar", "x": [1, 2], "y": ["A", "B"]}],
            "layout": {"title": {"text": title}, "margin": {"l": 10}, "yaxis": {"autorange": "reversed"}}
        })
        .to_string()
    }

    fn payload() -> ChartPayload {
        ChartPayload {
            success: true,
            pie_chart: Some(spec("pie")),
            bar_chart: Some(spec("bar")),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_layout_overrides_without_mutating() {
        let server = json!({"title": "UKT", "autosize": false, "margin": {"l": 10}})
            .as_object()
            .cloned()
            .unwrap();
        let before = server.clone();

        let merged = merge_layout(&server, Margin::uniform(50));

        assert_eq!(server, before);
        assert_eq!(merged["autosize"], json!(true));
        assert_eq!(merged["margin"], json!({"l": 50, "r": 50, "t": 50, "b": 50}));
        assert_eq!(merged["title"], json!("UKT"));
    }

    #[test]
    fn test_prepare_uses_per_chart_margins() {
        let charts = prepare_charts(&payload(), &ChartMargins::default()).unwrap();
        assert_eq!(charts.len(), 2);

        assert_eq!(charts[0].mount, ChartMount::Pie);
        assert_eq!(charts[0].layout["margin"]["l"], json!(50));

        assert_eq!(charts[1].mount, ChartMount::Bar);
        assert_eq!(charts[1].layout["margin"]["l"], json!(200));
        assert_eq!(charts[1].layout["yaxis"], json!({"autorange": "reversed"}));
        assert_eq!(charts[1].data.len(), 1);
    }

    #[test]
    fn test_empty_spec_is_render_error() {
        let mut p = payload();
        p.bar_chart = Some("   ".into());
        let err = prepare_charts(&p, &ChartMargins::default()).unwrap_err();
        assert_eq!(err, DashboardError::Render("bar_chart is empty".into()));

        p.bar_chart = None;
        assert!(prepare_charts(&p, &ChartMargins::default()).is_err());
    }

    #[test]
    fn test_malformed_spec_plots_nothing() {
        let charts = RecordingCharts::default();
        let mut p = payload();
        p.pie_chart = Some("{not json".into());

        let err = render_charts(&charts, &p, &ChartMargins::default()).unwrap_err();
        assert!(matches!(err, DashboardError::Render(msg) if msg.starts_with("pie_chart")));
        assert!(charts.calls().is_empty());
    }

    #[test]
    fn test_render_plots_both_with_config() {
        let charts = RecordingCharts::default();
        render_charts(&charts, &payload(), &ChartMargins::default()).unwrap();

        let plotted: Vec<ChartMount> = charts.plotted().iter().map(|c| c.mount).collect();
        assert_eq!(plotted, vec![ChartMount::Pie, ChartMount::Bar]);
        assert_eq!(
            serde_json::to_value(PlotConfig::default()).unwrap(),
            json!({"responsive": true, "displayModeBar": false})
        );
    }

    #[test]
    fn test_backend_failure_propagates() {
        let charts = RecordingCharts::failing_plot("Plotly is not defined");
        let err = render_charts(&charts, &payload(), &ChartMargins::default()).unwrap_err();
        assert_eq!(err, DashboardError::Render("Plotly is not defined".into()));
    }

    #[test]
    fn test_resize_all_touches_both_mounts() {
        let charts = RecordingCharts::default();
        resize_all(&charts);
        assert_eq!(
            charts.calls(),
            vec![
                ChartCall::Resize(ChartMount::Pie),
                ChartCall::Resize(ChartMount::Bar)
            ]
        );
    }
}
