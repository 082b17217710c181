//! web-sys implementation of [`View`]

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use crate::config::ElementIds;
use crate::error::DashboardError;
use crate::view::{attribute_selector, Display, Region, StatSlot, TableRow, View};

pub struct DomView {
    window: Window,
    document: Document,
    ids: ElementIds,
}

impl DomView {
    /// Bind to the current page. Fails if a required element is missing.
    pub fn new(ids: ElementIds) -> Result<Self, DashboardError> {
        let window = web_sys::window().ok_or_else(|| DashboardError::Dom("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| DashboardError::Dom("document".to_string()))?;

        if let Some(missing) = ids
            .required()
            .into_iter()
            .find(|id| document.get_element_by_id(id).is_none())
        {
            return Err(DashboardError::Dom(missing.to_string()));
        }

        Ok(Self {
            window,
            document,
            ids,
        })
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            tracing::warn!(id, "element not found");
        }
        element
    }

    fn region_id(&self, region: Region) -> &str {
        match region {
            Region::Results => &self.ids.results_section,
            Region::Loading => &self.ids.loading,
            Region::Charts => &self.ids.charts_container,
            Region::Stats => &self.ids.stats_summary,
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }
}

impl View for DomView {
    fn clear_active_cards(&mut self) {
        let Ok(cards) = self.document.query_selector_all(&self.ids.card_selector) else {
            tracing::warn!(selector = %self.ids.card_selector, "invalid card selector");
            return;
        };
        for i in 0..cards.length() {
            if let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = card.class_list().remove_1(&self.ids.active_class);
            }
        }
    }

    fn activate_card(&mut self, ptn: &str) -> bool {
        let selector = attribute_selector(&self.ids.card_attribute, ptn);
        match self.document.query_selector(&selector) {
            Ok(Some(card)) => card.class_list().add_1(&self.ids.active_class).is_ok(),
            _ => false,
        }
    }

    fn set_selected_label(&mut self, text: &str) {
        self.set_text(&self.ids.selected_label, text);
    }

    fn set_display(&mut self, region: Region, display: Display) {
        let Some(element) = self.element(self.region_id(region)) else {
            return;
        };
        if let Ok(html) = element.dyn_into::<HtmlElement>() {
            let _ = html.style().set_property("display", display.as_css());
        }
    }

    fn scroll_to_results(&mut self) {
        if let Some(section) = self.element(&self.ids.results_section) {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Start);
            section.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    }

    fn set_stat(&mut self, slot: StatSlot, text: &str) {
        let id = match slot {
            StatSlot::AvgCapacity => &self.ids.avg_capacity,
            StatSlot::AvgFee => &self.ids.avg_fee,
        };
        self.set_text(id, text);
    }

    fn clear_table(&mut self) {
        if let Some(body) = self.element(&self.ids.table_body) {
            body.set_inner_html("");
        }
    }

    fn append_row(&mut self, row: &TableRow) {
        let Some(body) = self.element(&self.ids.table_body) else {
            return;
        };
        let Ok(tr) = self.document.create_element("tr") else {
            return;
        };
        for cell in row {
            if let Ok(td) = self.document.create_element("td") {
                // Text content, not HTML: cell values come from the server
                td.set_text_content(Some(cell));
                let _ = tr.append_child(&td);
            }
        }
        let _ = body.append_child(&tr);
    }

    fn notify(&mut self, message: &str) {
        if self.window.alert_with_message(message).is_err() {
            tracing::error!(message, "alert failed");
        }
    }
}
