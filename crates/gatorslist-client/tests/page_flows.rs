//! Contact-seller, reply and create-with-image flows end to end.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use gatorslist_client::{FlowError, ImageUpload};
use gatorslist_types::models::{CreateListingInput, Listing, ListingType, Message, User};

use common::{client, spawn_stack};

type Log = Arc<Mutex<Vec<Value>>>;

#[derive(Clone, Default)]
struct Recorded {
    messages: Log,
    listings: Log,
}

fn backend(recorded: &Recorded, sending_works: bool) -> Router {
    let sent = recorded.messages.clone();
    let thread = recorded.messages.clone();
    let created = recorded.listings.clone();

    Router::new()
        .route(
            "/accounts/by-username/{username}",
            get(|Path(username): Path<String>| async move {
                if username == "grace" {
                    Ok(Json(json!({ "_id": "acc-grace", "username": username })))
                } else {
                    Err(StatusCode::NOT_FOUND)
                }
            }),
        )
        .route(
            "/messages/find-conversation",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let id = (q["listingid"] == "l-old").then(|| "c-old".to_string());
                Json(json!({ "conversationid": id }))
            }),
        )
        .route(
            "/messages",
            post(move |Json(body): Json<Value>| {
                let sent = sent.clone();
                async move {
                    if !sending_works {
                        return Err(StatusCode::INTERNAL_SERVER_ERROR);
                    }
                    let conversation = body
                        .get("conversationid")
                        .cloned()
                        .unwrap_or_else(|| json!("c-new"));
                    sent.lock().unwrap().push(body);
                    Ok(Json(json!({ "id": "m-1", "conversationid": conversation })))
                }
            })
            .get(move |Query(q): Query<HashMap<String, String>>| {
                let thread = thread.clone();
                async move {
                    let rows: Vec<Value> = thread
                        .lock()
                        .unwrap()
                        .iter()
                        .filter(|m| m["conversationid"] == q["conversationid"].as_str())
                        .enumerate()
                        .map(|(i, m)| {
                            json!({
                                "id": format!("m-{i}"),
                                "conversationid": m["conversationid"],
                                "senderid": m["senderid"],
                                "recipientid": m["recipientid"],
                                "listingid": m["listingid"],
                                "message": m["message"],
                                "timestamp": null,
                                "isread": false
                            })
                        })
                        .collect();
                    Json(Value::Array(rows))
                }
            }),
        )
        .route(
            "/upload",
            post(|body: Bytes| async move {
                if String::from_utf8_lossy(&body).contains("broken.jpg") {
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                } else {
                    Ok(Json(json!({ "key": "uploads/desk.jpg" })))
                }
            }),
        )
        .route(
            "/listings",
            post(move |Json(body): Json<Value>| {
                let created = created.clone();
                async move {
                    created.lock().unwrap().push(body);
                    Json(json!({ "id": "new-1" }))
                }
            }),
        )
}

fn albert() -> User {
    User {
        id: "u-albert".into(),
        username: "albert".into(),
        email: "albert@sfsu.edu".into(),
    }
}

fn listing(id: &str, owner: &str) -> Listing {
    Listing {
        id: id.into(),
        kind: ListingType::Item,
        title: "Desk".into(),
        price: 20.0,
        image_url: None,
        created_at: None,
        sold_at: None,
        user: owner.into(),
    }
}

fn message(sender: &str, recipient: &str) -> Message {
    Message {
        id: "m-0".into(),
        conversation_id: "c-old".into(),
        sender_id: sender.into(),
        recipient_id: recipient.into(),
        listing_id: "l-old".into(),
        message: "Hi! I'm interested in \"Desk\".".into(),
        timestamp: None,
        is_read: true,
    }
}

fn desk_input() -> CreateListingInput {
    CreateListingInput {
        kind: ListingType::Item,
        title: "Desk".into(),
        price: 20.0,
        image_key: String::new(),
    }
}

fn image(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: file_name.into(),
        content_type: "image/jpeg".into(),
        data: Bytes::from_static(b"JPEGDATA"),
    }
}

// ---------------------------------------------------------------------------
// Contact seller
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contacting_seller_opens_conversation_with_greeting() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;

    let id = client(&origin)
        .start_conversation(&listing("l-new", "grace"), &albert())
        .await
        .unwrap();

    assert_eq!(id, "c-new");
    let sent = recorded.messages.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![json!({
            "senderid": "u-albert",
            "recipientid": "acc-grace",
            "listingid": "l-new",
            "message": "Hi! I'm interested in \"Desk\"."
        })]
    );
}

#[tokio::test]
async fn contacting_seller_reuses_existing_conversation() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;

    let id = client(&origin)
        .start_conversation(&listing("l-old", "grace"), &albert())
        .await
        .unwrap();

    assert_eq!(id, "c-old");
    assert!(recorded.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn contacting_unknown_seller_fails_before_messaging() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;

    let err = client(&origin)
        .start_conversation(&listing("l-new", "ghost"), &albert())
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::SellerNotFound);
    assert_eq!(err.to_string(), "Could not find seller account.");
    assert!(recorded.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn contacting_seller_reports_failed_greeting() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, false)).await;

    let err = client(&origin)
        .start_conversation(&listing("l-new", "grace"), &albert())
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::ConversationFailed);
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reply_goes_to_other_party_and_refreshes_thread() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;
    let client = client(&origin);

    // Seller wrote first: the reply goes back to the seller.
    let thread = vec![message("acc-grace", "u-albert")];
    let refreshed = client
        .reply_in_thread("c-old", &albert(), &thread, "  Still available?  ")
        .await
        .unwrap();

    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].message, "Still available?");
    assert_eq!(refreshed[0].sender_id, "u-albert");
    assert_eq!(refreshed[0].recipient_id, "acc-grace");

    // Albert wrote first: the reply goes to the first message's recipient.
    let thread = vec![message("u-albert", "acc-grace")];
    client
        .reply_in_thread("c-old", &albert(), &thread, "Tomorrow works")
        .await
        .unwrap();

    let sent = recorded.messages.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1]["recipientid"], "acc-grace");
    assert_eq!(sent[1]["conversationid"], "c-old");
    assert_eq!(sent[1]["listingid"], "l-old");
}

#[tokio::test]
async fn reply_needs_thread_and_text() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;
    let client = client(&origin);

    let err = client
        .reply_in_thread("c-old", &albert(), &[], "hello")
        .await
        .unwrap_err();
    assert_eq!(err, FlowError::EmptyThread);

    let thread = vec![message("acc-grace", "u-albert")];
    let err = client
        .reply_in_thread("c-old", &albert(), &thread, "   ")
        .await
        .unwrap_err();
    assert_eq!(err, FlowError::EmptyMessage);

    assert!(recorded.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reply_reports_send_failure() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, false)).await;

    let thread = vec![message("acc-grace", "u-albert")];
    let err = client(&origin)
        .reply_in_thread("c-old", &albert(), &thread, "hello")
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::SendFailed);
}

// ---------------------------------------------------------------------------
// Create with image
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_uploads_image_then_creates_with_key() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;

    let id = client(&origin)
        .create_listing_with_image(&desk_input(), Some(image("desk.jpg")), "albert")
        .await
        .unwrap();

    assert_eq!(id, "new-1");
    let created = recorded.listings.lock().unwrap().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["image_key"], "uploads/desk.jpg");
    assert_eq!(created[0]["user"], "albert");
}

#[tokio::test]
async fn failed_upload_aborts_before_create() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;

    let err = client(&origin)
        .create_listing_with_image(&desk_input(), Some(image("broken.jpg")), "albert")
        .await
        .unwrap_err();

    assert_eq!(err, FlowError::UploadFailed);
    assert_eq!(err.to_string(), "Image upload failed. Please try again.");
    assert!(recorded.listings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_without_image_sends_null_key() {
    let recorded = Recorded::default();
    let origin = spawn_stack(backend(&recorded, true)).await;

    let id = client(&origin)
        .create_listing_with_image(&desk_input(), None, "albert")
        .await
        .unwrap();

    assert_eq!(id, "new-1");
    assert_eq!(recorded.listings.lock().unwrap()[0]["image_key"], Value::Null);
}
