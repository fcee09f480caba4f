use serde_json::{json, Value};

/// Shared error type used by the API client, payload builders and views.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("configuration error: {0}")]
    Config(String),

    /// The OAuth token endpoint rejected the login. `status` is `None` when
    /// the endpoint answered 2xx with an unreadable body.
    #[error("authentication failed")]
    Auth { status: Option<u16>, body: Value },

    #[error("transport error: {0}")]
    Transport(String),

    /// The platform answered with a non-success status. `body` holds the
    /// parsed JSON error payload, or a JSON string with the raw text.
    #[error("remote error (HTTP {status})")]
    Remote { status: u16, body: Value },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DemoError {
    /// Build a `Remote` error from a status code and the raw response text.
    pub fn remote(status: u16, text: &str) -> Self {
        Self::Remote {
            status,
            body: parse_body(text),
        }
    }

    /// Build an `Auth` error from a status code and the raw response text.
    pub fn auth(status: u16, text: &str) -> Self {
        Self::Auth {
            status: Some(status),
            body: parse_body(text),
        }
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Auth { .. } => "auth",
            Self::Transport(_) => "transport",
            Self::Remote { .. } => "remote",
            Self::Validation(_) => "validation",
            Self::Internal(_) => "internal",
        }
    }

    /// Displayable JSON form of the error.
    ///
    /// Errors that carry a platform response body yield that body verbatim,
    /// so the page shows exactly what the platform said.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Remote { body, .. } | Self::Auth { body, .. } if !body.is_null() => body.clone(),
            _ => json!({
                "error": self.kind(),
                "message": self.to_string(),
            }),
        }
    }
}

/// Parse a response body as JSON, falling back to a JSON string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
