//! Plotly bindings and the animation-frame layout scheduler

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::bridge::js_error_message;
use crate::charts::{ChartBackend, ChartMount, PlotConfig, PreparedChart};
use crate::error::DashboardError;
use crate::lifecycle::LayoutScheduler;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Plotly, js_name = newPlot)]
    fn plotly_new_plot(
        root: &str,
        data: &JsValue,
        layout: &JsValue,
        config: &JsValue,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["Plotly", "Plots"], js_name = resize)]
    fn plotly_plots_resize(root: &str) -> Result<JsValue, JsValue>;
}

/// Plain JS objects, not ES `Map`s: Plotly reads layouts by property
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, DashboardError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| DashboardError::Render(e.to_string()))
}

pub struct PlotlyBackend {
    pie_id: String,
    bar_id: String,
}

impl PlotlyBackend {
    pub fn new(pie_id: &str, bar_id: &str) -> Self {
        Self {
            pie_id: pie_id.to_string(),
            bar_id: bar_id.to_string(),
        }
    }

    fn mount_id(&self, mount: ChartMount) -> &str {
        match mount {
            ChartMount::Pie => &self.pie_id,
            ChartMount::Bar => &self.bar_id,
        }
    }
}

impl ChartBackend for PlotlyBackend {
    fn new_plot(&self, chart: &PreparedChart, config: &PlotConfig) -> Result<(), DashboardError> {
        let data = to_js(&chart.data)?;
        let layout = to_js(&chart.layout)?;
        let config = to_js(config)?;
        plotly_new_plot(self.mount_id(chart.mount), &data, &layout, &config)
            .map(|_| ())
            .map_err(|e| DashboardError::Render(format!("Plotly.newPlot: {}", js_error_message(&e))))
    }

    fn resize(&self, mount: ChartMount) -> Result<(), DashboardError> {
        plotly_plots_resize(self.mount_id(mount))
            .map(|_| ())
            .map_err(|e| {
                DashboardError::Render(format!("Plotly.Plots.resize: {}", js_error_message(&e)))
            })
    }
}

/// Runs tasks on the next animation frame, after the browser applied pending
/// style changes.
#[derive(Default)]
pub struct AnimationFrameScheduler;

impl LayoutScheduler for AnimationFrameScheduler {
    fn after_layout(&self, task: Box<dyn FnOnce()>) -> Result<(), DashboardError> {
        let window = web_sys::window().ok_or_else(|| DashboardError::Dom("window".to_string()))?;
        let callback = Closure::once_into_js(move || task());
        window
            .request_animation_frame(callback.unchecked_ref())
            .map(|_| ())
            .map_err(|e| {
                DashboardError::Render(format!("requestAnimationFrame: {}", js_error_message(&e)))
            })
    }
}
