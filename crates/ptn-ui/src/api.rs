//! API client for the charts endpoint
//!
//! Uses shared types from ptn-types for the response.
//! Uses web-sys fetch for WASM, reqwest for native.

use async_trait::async_trait;
use ptn_types::ChartPayload;

use crate::error::DashboardError;

/// Performs the charts request for a selection.
#[async_trait(?Send)]
pub trait ChartsFetcher {
    async fn fetch_charts(&self, url: &str) -> Result<ChartPayload, DashboardError>;
}

/// Decode a response body.
///
/// The server answers JSON even on failure, so the body is tried first and
/// the status only decides how an unreadable body is reported.
pub fn decode_payload(status: u16, body: &str) -> Result<ChartPayload, DashboardError> {
    match serde_json::from_str::<ChartPayload>(body) {
        Ok(payload) => Ok(payload),
        Err(_) if !(200..300).contains(&status) => {
            Err(DashboardError::Transport(format!("HTTP {}", status)))
        }
        Err(e) => Err(DashboardError::Decode(e.to_string())),
    }
}

pub struct ApiClient {
    /// Abort handle of the request in flight; a new request aborts it
    #[cfg(target_arch = "wasm32")]
    in_flight: std::cell::RefCell<Option<web_sys::AbortController>>,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            in_flight: std::cell::RefCell::new(None),
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    /// Abort the request in flight, if any
    #[cfg(target_arch = "wasm32")]
    pub fn abort_in_flight(&self) {
        if let Some(previous) = self.in_flight.borrow_mut().take() {
            previous.abort();
            tracing::debug!("aborted previous charts request");
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl ChartsFetcher for ApiClient {
    async fn fetch_charts(&self, url: &str) -> Result<ChartPayload, DashboardError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{AbortController, Request, RequestInit, RequestMode, Response};

        let transport = |what: &str, e: wasm_bindgen::JsValue| {
            DashboardError::Transport(format!("{}: {}", what, crate::bridge::js_error_message(&e)))
        };

        self.abort_in_flight();
        let abort = AbortController::new().map_err(|e| transport("abort controller", e))?;
        *self.in_flight.borrow_mut() = Some(abort.clone());

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        opts.set_signal(Some(&abort.signal()));

        let request =
            Request::new_with_str_and_init(url, &opts).map_err(|e| transport("request error", e))?;

        let window = web_sys::window()
            .ok_or_else(|| DashboardError::Transport("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| transport("fetch error", e))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| DashboardError::Transport("response is not a Response".to_string()))?;

        let text = JsFuture::from(resp.text().map_err(|e| transport("body error", e))?)
            .await
            .map_err(|e| transport("body error", e))?;

        decode_payload(resp.status(), &text.as_string().unwrap_or_default())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl ChartsFetcher for ApiClient {
    async fn fetch_charts(&self, url: &str) -> Result<ChartPayload, DashboardError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::Transport(e.to_string()))?;

        decode_payload(status, &body)
    }
}
