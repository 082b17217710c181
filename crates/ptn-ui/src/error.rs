//! Dashboard error types.

use thiserror::Error;

use crate::config::Labels;

/// Errors that end a selection's fetch-and-render cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Server answered with `success: false`.
    #[error("server reported failure: {}", .0.as_deref().unwrap_or("no message"))]
    Server(Option<String>),

    /// Network failure or non-2xx status without a usable body.
    #[error("transport error: {0}")]
    Transport(String),

    /// Body was not a charts payload.
    #[error("decode error: {0}")]
    Decode(String),

    /// Chart spec was empty or malformed, or the charting library threw.
    #[error("render error: {0}")]
    Render(String),

    /// Required page element is missing.
    #[error("missing element: #{0}")]
    Dom(String),
}

impl DashboardError {
    /// Text for the blocking notification.
    ///
    /// Server failures show the server's own message; everything else shows
    /// the generic load failure text.
    pub fn user_message(&self, labels: &Labels) -> String {
        let detail = match self {
            DashboardError::Server(Some(message)) if !message.is_empty() => message.as_str(),
            DashboardError::Server(_) => labels.no_data.as_str(),
            _ => labels.load_failed.as_str(),
        };
        format!("{}{}", labels.error_prefix, detail)
    }

    pub fn is_server(&self) -> bool {
        matches!(self, DashboardError::Server(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DashboardError::Server(Some("PTN tidak ditemukan".into()));
        assert!(err.to_string().contains("PTN tidak ditemukan"));

        let err = DashboardError::Dom("table-body".into());
        assert_eq!(err.to_string(), "missing element: #table-body");
    }

    #[test]
    fn user_message_uses_server_text() {
        let labels = Labels::default();
        let err = DashboardError::Server(Some("X".into()));
        assert_eq!(err.user_message(&labels), "An error occurred: X");
    }

    #[test]
    fn user_message_fallbacks() {
        let labels = Labels::default();
        assert_eq!(
            DashboardError::Server(None).user_message(&labels),
            "An error occurred: No data"
        );
        assert_eq!(
            DashboardError::Server(Some(String::new())).user_message(&labels),
            "An error occurred: No data"
        );
        assert_eq!(
            DashboardError::Transport("connection refused".into()).user_message(&labels),
            "An error occurred: Failed to load data"
        );
        assert_eq!(
            DashboardError::Render("pie_chart is empty".into()).user_message(&labels),
            "An error occurred: Failed to load data"
        );
    }
}
