//! Application State
//!
//! The one piece of mutable state the dashboard keeps: which PTN is selected
//! and which request is allowed to write to the page.
//!
//! ## Request tokens
//!
//! Every selection issues a fresh [`RequestToken`]. A response is applied only
//! if it carries the token of the selection still in flight, so a slow reply
//! for an earlier PTN can never overwrite a later one.

use std::fmt;

/// Identifies one selection's fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next(self) -> Self {
        RequestToken(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Load lifecycle of the current selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing selected yet
    #[default]
    Idle,
    /// Request in flight
    Loading(RequestToken),
    /// Results rendered
    Ready,
    /// Last request failed
    Failed,
}

#[derive(Debug, Default)]
pub struct AppState {
    selection: Option<String>,
    last_token: RequestToken,
    status: LoadStatus,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection and invalidate any in-flight request
    pub fn select(&mut self, ptn: &str) -> RequestToken {
        self.last_token = self.last_token.next();
        self.selection = Some(ptn.to_string());
        self.status = LoadStatus::Loading(self.last_token);
        self.last_token
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading(_))
    }

    /// True if `token` belongs to the request currently in flight
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.status == LoadStatus::Loading(token)
    }

    /// Close the in-flight request. Returns false for stale tokens, which
    /// leave the state untouched.
    pub fn settle(&mut self, token: RequestToken, ok: bool) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.status = if ok {
            LoadStatus::Ready
        } else {
            LoadStatus::Failed
        };
        true
    }
}
