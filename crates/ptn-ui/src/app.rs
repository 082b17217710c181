//! Dashboard: controller + fetcher
//!
//! Owns the async half of a selection. The controller is shared through
//! `Rc<RefCell<_>>` between the page's event handlers; a borrow is never
//! held across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::ChartsFetcher;
use crate::controller::{Completion, SelectionController};
use crate::view::View;

pub struct Dashboard<V: View, F: ChartsFetcher> {
    controller: Rc<RefCell<SelectionController<V>>>,
    fetcher: Rc<F>,
}

impl<V: View, F: ChartsFetcher> Clone for Dashboard<V, F> {
    fn clone(&self) -> Self {
        Self {
            controller: Rc::clone(&self.controller),
            fetcher: Rc::clone(&self.fetcher),
        }
    }
}

impl<V: View, F: ChartsFetcher> Dashboard<V, F> {
    pub fn new(controller: SelectionController<V>, fetcher: F) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            fetcher: Rc::new(fetcher),
        }
    }

    pub fn controller(&self) -> &Rc<RefCell<SelectionController<V>>> {
        &self.controller
    }

    /// Select a PTN, fetch its charts and render them.
    ///
    /// Selecting again before this resolves makes this call's response stale.
    pub async fn select(&self, ptn: &str) -> Completion {
        let ticket = self.controller.borrow_mut().begin_selection(ptn);
        let result = self.fetcher.fetch_charts(&ticket.url).await;
        self.controller.borrow_mut().complete(&ticket, result)
    }

    pub fn viewport_resized(&self) {
        self.controller.borrow_mut().on_viewport_resize();
    }
}
