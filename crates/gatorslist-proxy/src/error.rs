use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::warn;

use gatorslist_types::api::ErrorResponse;

/// Message returned whenever the backend cannot be reached or answers with
/// something that is not JSON.
pub const BACKEND_UNAVAILABLE: &str = "Backend unavailable";

/// Everything a proxy route can fail with. Each variant renders as a JSON
/// body; nothing escapes the route as a panic or an empty 500.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The inbound request is missing something required.
    #[error("{0}")]
    Validation(String),

    /// The backend answered non-2xx and the route reports its own message
    /// under the backend's status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// The backend answered non-2xx and the route relays the backend's body
    /// as-is.
    #[error("backend returned {status}")]
    Relayed { status: StatusCode, body: Value },

    #[error("Backend unavailable")]
    Unavailable(#[from] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } | Self::Relayed { status, .. } => *status,
            Self::Unavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ProxyError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Relayed { body, .. } => (status, Json(body)).into_response(),
            Self::Unavailable(e) => {
                warn!("Backend unreachable: {}", e);
                (status, Json(ErrorResponse::new(BACKEND_UNAVAILABLE))).into_response()
            }
            other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}
