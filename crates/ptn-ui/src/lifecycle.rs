//! Visibility and resize lifecycle
//!
//! Plotly sizes a chart from its container, and a container only has real
//! dimensions once it is displayed. Resizes are therefore deferred until the
//! browser has laid out the current frame, via a [`LayoutScheduler`].

use std::cell::Cell;
use std::rc::Rc;

use crate::charts::{resize_all, ChartBackend};
use crate::error::DashboardError;

/// Runs work once the page has been laid out.
///
/// In the browser this is `requestAnimationFrame`; tests flush tasks by hand.
/// An `Err` means the task was dropped and will never run.
pub trait LayoutScheduler {
    fn after_layout(&self, task: Box<dyn FnOnce()>) -> Result<(), DashboardError>;
}

/// Coalesces chart resize requests into one per layout pass.
pub struct ChartResizer {
    charts: Rc<dyn ChartBackend>,
    scheduler: Rc<dyn LayoutScheduler>,
    pending: Rc<Cell<bool>>,
}

impl ChartResizer {
    pub fn new(charts: Rc<dyn ChartBackend>, scheduler: Rc<dyn LayoutScheduler>) -> Self {
        Self {
            charts,
            scheduler,
            pending: Rc::new(Cell::new(false)),
        }
    }

    /// Schedule a resize of both charts unless one is already queued
    pub fn request(&self) {
        if self.pending.replace(true) {
            tracing::debug!("chart resize already scheduled");
            return;
        }

        let pending = Rc::clone(&self.pending);
        let charts = Rc::clone(&self.charts);
        let scheduled = self.scheduler.after_layout(Box::new(move || {
            pending.set(false);
            resize_all(charts.as_ref());
        }));

        if let Err(e) = scheduled {
            tracing::warn!(error = %e, "layout scheduling failed, resizing now");
            self.pending.set(false);
            resize_all(self.charts.as_ref());
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
