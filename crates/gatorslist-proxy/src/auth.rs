use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use gatorslist_types::api::{LoginRequest, RegisterRequest};

use crate::error::ProxyError;
use crate::relay::relay_create;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ProxyError> {
    let Json(req) = payload?;
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(ProxyError::Validation(
            "Username and password are required".into(),
        ));
    }

    let request = state.http.post(state.endpoint(&["auth", "login"])).json(&req);
    relay_create(
        &state,
        request,
        StatusCode::OK,
        json!({ "error": "Authentication failed" }),
    )
    .await
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ProxyError> {
    let Json(req) = payload?;
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty()
    {
        return Err(ProxyError::Validation(
            "Username, email, and password are required".into(),
        ));
    }

    let request = state
        .http
        .post(state.endpoint(&["auth", "register"]))
        .json(&req);
    relay_create(
        &state,
        request,
        StatusCode::CREATED,
        json!({ "error": "Authentication failed" }),
    )
    .await
}
