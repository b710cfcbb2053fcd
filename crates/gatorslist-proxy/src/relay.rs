use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::RequestBuilder;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::ProxyError;
use crate::state::AppStateInner;

/// What the backend said, once it said anything at all.
pub(crate) enum Upstream {
    Success(Value),
    Failure { status: StatusCode, body: Option<Value> },
}

/// Send exactly one request to the backend. Transport errors and unparsable
/// success bodies both surface as `ProxyError::Unavailable`.
pub(crate) async fn forward(
    state: &AppStateInner,
    request: RequestBuilder,
) -> Result<Upstream, ProxyError> {
    let request = request.build()?;
    debug!("Forwarding {} {}", request.method(), request.url());

    let response = state.http.execute(request).await?;
    let status = response.status();

    if status.is_success() {
        let body = response.json::<Value>().await?;
        Ok(Upstream::Success(body))
    } else {
        warn!("Backend answered {} for {}", status, response.url());
        let body = response.json::<Value>().await.ok();
        Ok(Upstream::Failure { status, body })
    }
}

/// List routes never fail: any failure becomes `[]`, under the backend's
/// status or 502 when the backend could not be reached.
pub(crate) async fn relay_list(state: &AppStateInner, request: RequestBuilder) -> Response {
    match forward(state, request).await {
        Ok(Upstream::Success(body)) => Json(body).into_response(),
        Ok(Upstream::Failure { status, .. }) => (status, Json(json!([]))).into_response(),
        Err(e) => {
            warn!("List request degraded to empty: {}", e);
            (StatusCode::BAD_GATEWAY, Json(json!([]))).into_response()
        }
    }
}

/// Single-resource GET: the object on success, `{error: not_found}` under the
/// backend's status otherwise.
pub(crate) async fn relay_resource(
    state: &AppStateInner,
    request: RequestBuilder,
    not_found: &str,
) -> Result<Json<Value>, ProxyError> {
    match forward(state, request).await? {
        Upstream::Success(body) => Ok(Json(body)),
        Upstream::Failure { status, .. } => Err(ProxyError::Upstream {
            status,
            message: not_found.to_string(),
        }),
    }
}

/// Create-style POST: answers `success_status` with the backend body, or
/// relays the backend's error body. `fallback` stands in when the error body
/// is not JSON.
pub(crate) async fn relay_create(
    state: &AppStateInner,
    request: RequestBuilder,
    success_status: StatusCode,
    fallback: Value,
) -> Result<(StatusCode, Json<Value>), ProxyError> {
    match forward(state, request).await? {
        Upstream::Success(body) => Ok((success_status, Json(body))),
        Upstream::Failure { status, body } => Err(ProxyError::Relayed {
            status,
            body: body.unwrap_or(fallback),
        }),
    }
}
