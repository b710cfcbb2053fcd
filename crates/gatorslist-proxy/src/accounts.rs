use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::error::ProxyError;
use crate::relay::relay_resource;
use crate::state::AppState;

/// GET /api/accounts/by-username/{username}: resolves the handle shown on a
/// listing to the account id messaging needs.
pub async fn get_account_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    let request = state
        .http
        .get(state.endpoint(&["accounts", "by-username", &username]));
    relay_resource(&state, request, "Account not found").await
}
