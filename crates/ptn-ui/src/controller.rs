//! Selection Controller
//!
//! Drives one PTN selection through its lifecycle:
//!
//! ```text
//! begin_selection(ptn) ──► FetchTicket ──► (caller fetches) ──► complete(ticket, result)
//!        │                                                          │
//!   reset page, show loading                    stale? drop : render or show error
//! ```
//!
//! The controller is synchronous. Fetching happens outside it (see
//! [`crate::app::Dashboard`]), which keeps every page transition testable
//! without a runtime.

use std::rc::Rc;

use ptn_types::ChartPayload;

use crate::charts::{plot_charts, prepare_charts, ChartBackend};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::lifecycle::{ChartResizer, LayoutScheduler};
use crate::state::{AppState, RequestToken};
use crate::table::update_table;
use crate::view::{Display, Region, StatSlot, View};

/// A request the caller must perform for a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub ptn: String,
    pub url: String,
}

/// What `complete` did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Results rendered
    Applied,
    /// Error shown to the user
    Failed,
    /// Response belonged to a superseded selection and was dropped
    Stale,
}

type ResultsReadyListener = Box<dyn FnMut(&str)>;

pub struct SelectionController<V: View> {
    config: DashboardConfig,
    state: AppState,
    view: V,
    charts: Rc<dyn ChartBackend>,
    resizer: ChartResizer,
    results_ready: Vec<ResultsReadyListener>,
}

impl<V: View> SelectionController<V> {
    pub fn new(
        config: DashboardConfig,
        view: V,
        charts: Rc<dyn ChartBackend>,
        scheduler: Rc<dyn LayoutScheduler>,
    ) -> Self {
        let resizer = ChartResizer::new(Rc::clone(&charts), scheduler);
        Self {
            config,
            state: AppState::new(),
            view,
            charts,
            resizer,
            results_ready: Vec::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Called with the PTN name each time results become visible
    pub fn on_results_ready(&mut self, listener: impl FnMut(&str) + 'static) {
        self.results_ready.push(Box::new(listener));
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Reset the page for `ptn` and issue a ticket for its charts request.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_selection(&mut self, ptn: &str) -> FetchTicket {
        self.view.clear_active_cards();
        if !self.view.activate_card(ptn) {
            tracing::warn!(ptn, "no card for selected PTN");
        }

        let label = format!("{}{}", self.config.labels.selected_prefix, ptn);
        self.view.set_selected_label(&label);

        self.view.set_display(Region::Results, Display::Block);
        self.view.set_display(Region::Loading, Display::Block);
        self.view.set_display(Region::Charts, Display::None);
        self.view.set_display(Region::Stats, Display::None);

        let token = self.state.select(ptn);
        self.view.scroll_to_results();

        let url = self.config.charts_url(ptn);
        tracing::info!(ptn, %token, %url, "PTN selected");

        FetchTicket {
            token,
            ptn: ptn.to_string(),
            url,
        }
    }

    /// Apply the outcome of a ticket's request.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ChartPayload, DashboardError>,
    ) -> Completion {
        if !self.state.is_current(ticket.token) {
            tracing::warn!(ptn = %ticket.ptn, token = %ticket.token, "dropping stale charts response");
            return Completion::Stale;
        }

        match result.and_then(|payload| self.apply_payload(payload)) {
            Ok(()) => {
                self.state.settle(ticket.token, true);
                tracing::info!(ptn = %ticket.ptn, "charts rendered");
                Completion::Applied
            }
            Err(err) => {
                self.state.settle(ticket.token, false);
                self.handle_error(&err);
                Completion::Failed
            }
        }
    }

    fn apply_payload(&mut self, payload: ChartPayload) -> Result<(), DashboardError> {
        if !payload.success {
            return Err(DashboardError::Server(payload.error));
        }

        let charts = prepare_charts(&payload, &self.config.margins)?;

        let na = self.config.labels.not_available.as_str();
        self.view.set_stat(
            StatSlot::AvgCapacity,
            non_empty_or(payload.avg_daya_tampung.as_deref(), na),
        );
        self.view
            .set_stat(StatSlot::AvgFee, non_empty_or(payload.avg_ukt.as_deref(), na));
        self.view.set_display(Region::Stats, Display::Grid);

        plot_charts(self.charts.as_ref(), &charts)?;
        update_table(&mut self.view, &payload.table_data, na);
        self.show_results();
        Ok(())
    }

    fn handle_error(&mut self, err: &DashboardError) {
        if err.is_server() {
            tracing::warn!(error = %err, "charts request rejected");
        } else {
            tracing::error!(error = %err, "charts request failed");
        }

        self.view.set_display(Region::Loading, Display::None);
        self.view.set_display(Region::Stats, Display::None);
        self.view.notify(&err.user_message(&self.config.labels));
    }

    // =========================================================================
    // VISIBILITY / RESIZE
    // =========================================================================

    /// Hide loading, reveal the charts, then announce results-ready.
    ///
    /// This is the only path that makes the chart container visible, so it is
    /// also where the post-layout chart resize is requested.
    pub fn show_results(&mut self) {
        self.view.set_display(Region::Loading, Display::None);
        self.view.set_display(Region::Charts, Display::Flex);
        self.resizer.request();

        if let Some(ptn) = self.state.selection() {
            for listener in self.results_ready.iter_mut() {
                listener(ptn);
            }
        }
    }

    /// Viewport resized. Only charts of an active selection are re-laid out.
    pub fn on_viewport_resize(&mut self) {
        if !self.state.has_selection() {
            return;
        }
        self.resizer.request();
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}
