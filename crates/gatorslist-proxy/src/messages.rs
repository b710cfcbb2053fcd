use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use gatorslist_types::api::ConversationLookup;

use crate::error::ProxyError;
use crate::relay::{Upstream, forward, relay_create, relay_list};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub conversationid: Option<String>,
    pub listingid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConversationsQuery {
    pub userid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FindConversationQuery {
    pub listingid: Option<String>,
    pub user1: Option<String>,
    pub user2: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// GET /api/messages: only the filters the caller supplied are forwarded.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Response {
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(cid) = present(query.conversationid) {
        params.push(("conversationid", cid));
    }
    if let Some(lid) = present(query.listingid) {
        params.push(("listingid", lid));
    }

    let request = state.http.get(state.endpoint(&["messages"])).query(&params);
    relay_list(&state, request).await
}

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ProxyError> {
    let Json(body) = payload?;
    let request = state.http.post(state.endpoint(&["messages"])).json(&body);
    relay_create(&state, request, StatusCode::CREATED, json!({})).await
}

/// GET /api/messages/conversations?userid=
pub async fn get_conversations(
    State(state): State<AppState>,
    Query(query): Query<ConversationsQuery>,
) -> Result<Response, ProxyError> {
    let user_id = present(query.userid)
        .ok_or_else(|| ProxyError::Validation("userid is required".into()))?;

    let request = state
        .http
        .get(state.endpoint(&["messages", "conversations", &user_id]));
    Ok(relay_list(&state, request).await)
}

/// GET /api/messages/find-conversation
///
/// Failure of any kind answers `{conversationid: null}` so callers treat
/// "no conversation" and "lookup failed" the same way.
pub async fn find_conversation(
    State(state): State<AppState>,
    Query(query): Query<FindConversationQuery>,
) -> Result<Response, ProxyError> {
    let (Some(listingid), Some(user1), Some(user2)) = (
        present(query.listingid),
        present(query.user1),
        present(query.user2),
    ) else {
        return Err(ProxyError::Validation(
            "listingid, user1, user2 required".into(),
        ));
    };

    let request = state
        .http
        .get(state.endpoint(&["messages", "find-conversation"]))
        .query(&[("listingid", listingid), ("user1", user1), ("user2", user2)]);

    let none = Json(ConversationLookup {
        conversationid: None,
    });
    let response = match forward(&state, request).await {
        Ok(Upstream::Success(body)) => Json(body).into_response(),
        Ok(Upstream::Failure { status, .. }) => (status, none).into_response(),
        Err(e) => {
            warn!("Conversation lookup degraded to none: {}", e);
            (StatusCode::BAD_GATEWAY, none).into_response()
        }
    };
    Ok(response)
}
