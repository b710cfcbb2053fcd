use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;
use crate::{accounts, auth, listings, messages, upload};

/// Every BFF route, mounted under `/api`.
pub fn api_routes(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/listings",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/listings/featured", get(listings::featured_listings))
        .route("/listings/{id}", get(listings::get_listing))
        .route("/posts", get(listings::list_posts).post(listings::create_post))
        .route("/posts/{id}", get(listings::get_post))
        .route("/items/featured", get(listings::featured_posts))
        .route(
            "/accounts/by-username/{username}",
            get(accounts::get_account_by_username),
        )
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route(
            "/messages",
            get(messages::get_messages).post(messages::send_message),
        )
        .route("/messages/conversations", get(messages::get_conversations))
        .route(
            "/messages/find-conversation",
            get(messages::find_conversation),
        )
        .route(
            "/upload",
            post(upload::upload_image).layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_SIZE)),
        )
        .with_state(state);

    Router::new().nest("/api", api)
}
