use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ProxyError;
use crate::relay::{relay_create, relay_list, relay_resource};
use crate::state::{AppState, AppStateInner};

const DEFAULT_LIST_LIMIT: &str = "50";
const DEFAULT_FEATURED_LIMIT: &str = "10";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<String>,
}

/// `/listings` and the legacy `/posts` share one contract; only the resource
/// name differs.
async fn list(state: &AppStateInner, resource: &str, query: ListQuery) -> Response {
    let mut params: Vec<(&str, String)> = Vec::with_capacity(3);
    if let Some(kind) = query.kind.filter(|k| !k.is_empty()) {
        params.push(("type", kind));
    }
    // Sold listings never reach the browse pages.
    params.push(("include_sold", "false".to_string()));
    params.push((
        "limit",
        query.limit.unwrap_or_else(|| DEFAULT_LIST_LIMIT.to_string()),
    ));

    let request = state.http.get(state.endpoint(&[resource])).query(&params);
    relay_list(state, request).await
}

async fn featured(state: &AppStateInner, resource: &str, query: FeaturedQuery) -> Response {
    let limit = query
        .limit
        .unwrap_or_else(|| DEFAULT_FEATURED_LIMIT.to_string());
    let request = state
        .http
        .get(state.endpoint(&[resource, "featured"]))
        .query(&[("limit", limit)]);
    relay_list(state, request).await
}

async fn create(
    state: &AppStateInner,
    resource: &str,
    body: Value,
) -> Result<(StatusCode, Json<Value>), ProxyError> {
    let request = state.http.post(state.endpoint(&[resource])).json(&body);
    relay_create(state, request, StatusCode::CREATED, json!({})).await
}

/// GET /api/listings
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    list(&state, "listings", query).await
}

/// GET /api/listings/featured
pub async fn featured_listings(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Response {
    featured(&state, "listings", query).await
}

/// GET /api/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    let request = state.http.get(state.endpoint(&["listings", &id]));
    relay_resource(&state, request, "Listing not found").await
}

/// POST /api/listings: the body is forwarded untouched.
pub async fn create_listing(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ProxyError> {
    let Json(body) = payload?;
    create(&state, "listings", body).await
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    list(&state, "posts", query).await
}

/// GET /api/items/featured: featured posts for the landing page.
pub async fn featured_posts(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Response {
    featured(&state, "posts", query).await
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    let request = state.http.get(state.endpoint(&["posts", &id]));
    relay_resource(&state, request, "Post not found").await
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ProxyError> {
    let Json(body) = payload?;
    create(&state, "posts", body).await
}
