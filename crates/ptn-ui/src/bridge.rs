//! JS Bridge for WASM ↔ page communication
//!
//! Outbound: a `CustomEvent` on `window` whenever results become visible, so
//! page scripts can react without watching style mutations.
//! Inbound: the window `resize` listener.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Window};

use crate::error::DashboardError;

pub struct JsBridge {
    window: Window,
    results_ready_event: String,
    resize_listener: Option<Closure<dyn FnMut()>>,
}

impl JsBridge {
    pub fn new(results_ready_event: &str) -> Result<Self, DashboardError> {
        let window = web_sys::window().ok_or_else(|| DashboardError::Dom("window".to_string()))?;
        Ok(Self {
            window,
            results_ready_event: results_ready_event.to_string(),
            resize_listener: None,
        })
    }

    /// Emits the results-ready event with the PTN name as `detail`
    pub fn results_ready_emitter(&self) -> impl FnMut(&str) + 'static {
        let window = self.window.clone();
        let name = self.results_ready_event.clone();
        move |ptn: &str| emit(&window, &name, ptn)
    }

    /// Listen for window resizes, replacing any previous listener
    pub fn on_resize(&mut self, handler: impl FnMut() + 'static) {
        self.remove_resize_listener();

        let callback = Closure::<dyn FnMut()>::new(handler);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
        {
            tracing::error!(error = ?e, "failed to register resize listener");
            return;
        }
        self.resize_listener = Some(callback);
        tracing::info!("JsBridge: resize listener registered on window");
    }

    fn remove_resize_listener(&mut self) {
        if let Some(callback) = self.resize_listener.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for JsBridge {
    fn drop(&mut self) {
        self.remove_resize_listener();
    }
}

fn emit(window: &Window, name: &str, ptn: &str) {
    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_str(ptn));

    match CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(e) => tracing::warn!(event = name, error = ?e, "failed to create event"),
    }
}

/// Message of a thrown JS value (`Error.message`, a thrown string, or its debug form)
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
