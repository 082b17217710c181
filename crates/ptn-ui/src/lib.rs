//! PTN Dashboard UI - selection controller
//!
//! Selecting a PTN card loads its capacity/fee statistics, a pie chart, a bar
//! chart and a programme table from `/api/charts/{ptn}`.
//!
//! ## Layout
//!
//! - [`controller`]: page transitions for one selection (sync, testable)
//! - [`app`]: ties the controller to a [`api::ChartsFetcher`]
//! - [`charts`], [`table`], [`lifecycle`]: renderers and resize handling
//! - `dom`, `plotly`, `bridge`: browser-only backends (wasm32)
//!
//! ## Page API
//!
//! ```js
//! import init, { configure, selectPTN } from "./ptn_ui.js";
//! await init();
//! configure({ labels: { selected_prefix: "PTN Terpilih: " } });
//! card.onclick = () => selectPTN(card.dataset.ptn);
//! ```

pub mod api;
pub mod app;
pub mod charts;
pub mod config;
pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod state;
pub mod table;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod bridge;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod plotly;

#[cfg(test)]
mod testing;

pub use app::Dashboard;
pub use config::DashboardConfig;
pub use controller::{Completion, FetchTicket, SelectionController};
pub use error::DashboardError;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::api::ApiClient;
    use crate::bridge::JsBridge;
    use crate::dom::DomView;
    use crate::plotly::{AnimationFrameScheduler, PlotlyBackend};
    use crate::{Dashboard, DashboardConfig, DashboardError, SelectionController};

    type BrowserDashboard = Dashboard<DomView, ApiClient>;

    struct BrowserApp {
        dashboard: BrowserDashboard,
        _bridge: JsBridge,
    }

    thread_local! {
        static APP: RefCell<Option<BrowserApp>> = const { RefCell::new(None) };
    }

    fn to_js_error(e: DashboardError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    fn build(config: DashboardConfig) -> Result<BrowserApp, DashboardError> {
        let view = DomView::new(config.elements.clone())?;
        let charts = Rc::new(PlotlyBackend::new(
            &config.elements.pie_chart,
            &config.elements.bar_chart,
        ));
        let mut bridge = JsBridge::new(&config.results_ready_event)?;

        let mut controller =
            SelectionController::new(config, view, charts, Rc::new(AnimationFrameScheduler));
        controller.on_results_ready(bridge.results_ready_emitter());

        let dashboard = Dashboard::new(controller, ApiClient::new());

        let on_resize = dashboard.clone();
        bridge.on_resize(move || {
            // Skip if a selection is mid-transition; the next event catches up
            if let Ok(mut controller) = on_resize.controller().try_borrow_mut() {
                controller.on_viewport_resize();
            }
        });

        Ok(BrowserApp {
            dashboard,
            _bridge: bridge,
        })
    }

    fn install(config: DashboardConfig) -> Result<BrowserDashboard, DashboardError> {
        let app = build(config)?;
        let dashboard = app.dashboard.clone();
        APP.with(|slot| *slot.borrow_mut() = Some(app));
        tracing::info!("PTN dashboard configured");
        Ok(dashboard)
    }

    fn current_or_default() -> Result<BrowserDashboard, DashboardError> {
        let existing = APP.with(|slot| slot.borrow().as_ref().map(|app| app.dashboard.clone()));
        match existing {
            Some(dashboard) => Ok(dashboard),
            None => install(DashboardConfig::default()),
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
        web_sys::console::log_1(&"=== PTN DASHBOARD WASM LOADED ===".into());
    }

    /// Bind the dashboard to the page. Missing config fields keep defaults.
    #[wasm_bindgen]
    pub fn configure(config: JsValue) -> Result<(), JsValue> {
        let config: DashboardConfig = if config.is_undefined() || config.is_null() {
            DashboardConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("invalid config: {}", e)))?
        };
        install(config).map(|_| ()).map_err(to_js_error)
    }

    /// Card click handler
    #[wasm_bindgen(js_name = selectPTN)]
    pub fn select_ptn(ptn: String) -> Result<(), JsValue> {
        let dashboard = current_or_default().map_err(to_js_error)?;
        wasm_bindgen_futures::spawn_local(async move {
            let completion = dashboard.select(&ptn).await;
            tracing::debug!(ptn = %ptn, ?completion, "selection finished");
        });
        Ok(())
    }
}
