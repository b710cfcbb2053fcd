use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode, Url, multipart};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use gatorslist_types::api::{
    AccountRecord, AuthResponse, ConversationLookup, ConversationRecord, CreateListingRequest,
    CreatedListing, ErrorResponse, ListingRecord, LoginRequest, MessageRecord, RegisterRequest,
    SendMessageRequest, SentMessage, UploadResponse,
};
use gatorslist_types::models::{
    Account, ConversationPreview, CreateListingInput, FeaturedItem, Listing, ListingType, Message,
    User,
};

use crate::mapping::{map_account, map_conversation, map_featured, map_listing, map_message};
use crate::object_storage::ObjectStorage;
use crate::session::AuthError;

/// Shown when the server accepted an auth request but its answer is unusable.
const AUTH_FAILED: &str = "Authentication failed";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(StatusCode),
}

/// Caller-facing access to the marketplace through the BFF routes.
///
/// Every public fetch swallows failures into a safe default (empty list,
/// `None`) and logs them; UI code never has to handle an error from here.
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    http: Client,
    base_url: Url,
    storage: ObjectStorage,
}

impl MarketplaceClient {
    /// `base_url` is the origin serving `/api/*`.
    pub fn new(base_url: &str, storage: ObjectStorage) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url, storage)
    }

    pub fn with_client(
        http: Client,
        base_url: &str,
        storage: ObjectStorage,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        Ok(Self {
            http,
            base_url,
            storage,
        })
    }

    pub fn storage(&self) -> &ObjectStorage {
        &self.storage
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(response.json::<T>().await?)
    }

    // -- Listings --

    pub async fn fetch_listings(&self, kind: ListingType) -> Vec<Listing> {
        self.list_of("listings", kind).await
    }

    pub async fn fetch_listing(&self, id: &str) -> Option<Listing> {
        self.one_of("listings", id).await
    }

    /// Legacy post endpoints; same shape as listings.
    pub async fn fetch_posts(&self, kind: ListingType) -> Vec<Listing> {
        self.list_of("posts", kind).await
    }

    pub async fn fetch_post(&self, id: &str) -> Option<Listing> {
        self.one_of("posts", id).await
    }

    async fn list_of(&self, resource: &str, kind: ListingType) -> Vec<Listing> {
        let request = self
            .http
            .get(self.endpoint(&[resource]))
            .query(&[("type", kind.as_str())]);
        match self.fetch::<Vec<ListingRecord>>(request).await {
            Ok(rows) => rows
                .into_iter()
                .map(|raw| map_listing(raw, &self.storage))
                .collect(),
            Err(e) => {
                warn!("Fetching {} ({}) failed: {}", resource, kind, e);
                Vec::new()
            }
        }
    }

    async fn one_of(&self, resource: &str, id: &str) -> Option<Listing> {
        let request = self.http.get(self.endpoint(&[resource, id]));
        match self.fetch::<ListingRecord>(request).await {
            Ok(raw) => Some(map_listing(raw, &self.storage)),
            Err(ClientError::Status(StatusCode::NOT_FOUND)) => {
                debug!("{} {} not found", resource, id);
                None
            }
            Err(e) => {
                warn!("Fetching {} {} failed: {}", resource, id, e);
                None
            }
        }
    }

    /// Creates a listing owned by `user_name` and returns its id.
    pub async fn create_listing(
        &self,
        input: &CreateListingInput,
        user_name: &str,
    ) -> Option<String> {
        let body = CreateListingRequest {
            kind: input.kind,
            title: input.title.trim().to_string(),
            price: input.price,
            image_key: Some(input.image_key.clone()).filter(|k| !k.is_empty()),
            user: user_name.to_string(),
        };
        let request = self.http.post(self.endpoint(&["listings"])).json(&body);
        match self.fetch::<CreatedListing>(request).await {
            Ok(created) => Some(created.id),
            Err(e) => {
                warn!("Creating listing '{}' failed: {}", body.title, e);
                None
            }
        }
    }

    pub async fn fetch_featured_items(&self) -> Vec<FeaturedItem> {
        let request = self.http.get(self.endpoint(&["listings", "featured"]));
        match self.fetch::<Vec<ListingRecord>>(request).await {
            Ok(rows) => rows
                .into_iter()
                .map(|raw| map_listing(raw, &self.storage))
                .filter_map(map_featured)
                .collect(),
            Err(e) => {
                warn!("Fetching featured items failed: {}", e);
                Vec::new()
            }
        }
    }

    // -- Accounts --

    pub async fn lookup_account(&self, username: &str) -> Option<Account> {
        let request = self
            .http
            .get(self.endpoint(&["accounts", "by-username", username]));
        match self.fetch::<AccountRecord>(request).await {
            Ok(raw) => Some(map_account(raw)),
            Err(e) => {
                debug!("Account lookup for '{}' failed: {}", username, e);
                None
            }
        }
    }

    // -- Messages --

    pub async fn send_message(&self, message: &SendMessageRequest) -> Option<SentMessage> {
        let request = self.http.post(self.endpoint(&["messages"])).json(message);
        self.fetch(request)
            .await
            .inspect_err(|e| warn!("Sending message failed: {}", e))
            .ok()
    }

    pub async fn fetch_messages(&self, conversation_id: &str) -> Vec<Message> {
        let request = self
            .http
            .get(self.endpoint(&["messages"]))
            .query(&[("conversationid", conversation_id)]);
        match self.fetch::<Vec<MessageRecord>>(request).await {
            Ok(rows) => rows.into_iter().map(map_message).collect(),
            Err(e) => {
                warn!("Fetching messages for {} failed: {}", conversation_id, e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_conversations(&self, user_id: &str) -> Vec<ConversationPreview> {
        let request = self
            .http
            .get(self.endpoint(&["messages", "conversations"]))
            .query(&[("userid", user_id)]);
        match self.fetch::<Vec<ConversationRecord>>(request).await {
            Ok(rows) => rows.into_iter().map(map_conversation).collect(),
            Err(e) => {
                warn!("Fetching conversations for {} failed: {}", user_id, e);
                Vec::new()
            }
        }
    }

    /// Existing conversation between two users about one listing, if any.
    pub async fn find_conversation(
        &self,
        listing_id: &str,
        user1: &str,
        user2: &str,
    ) -> Option<String> {
        let request = self
            .http
            .get(self.endpoint(&["messages", "find-conversation"]))
            .query(&[("listingid", listing_id), ("user1", user1), ("user2", user2)]);
        match self.fetch::<ConversationLookup>(request).await {
            Ok(lookup) => lookup.conversationid,
            Err(e) => {
                debug!("Conversation lookup failed: {}", e);
                None
            }
        }
    }

    // -- Uploads --

    /// Uploads an image and returns its object key.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Option<String> {
        let part = match multipart::Part::stream(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
        {
            Ok(part) => part,
            Err(e) => {
                warn!("Rejected content type '{}': {}", content_type, e);
                return None;
            }
        };
        let form = multipart::Form::new().part("file", part);
        let request = self.http.post(self.endpoint(&["upload"])).multipart(form);

        match self.fetch::<UploadResponse>(request).await {
            Ok(uploaded) => Some(uploaded.key),
            Err(e) => {
                warn!("Uploading '{}' failed: {}", file_name, e);
                None
            }
        }
    }

    // -- Auth --

    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.http.post(self.endpoint(&["auth", "login"])).json(&body);
        self.authenticate(request, "Invalid username or password")
            .await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self
            .http
            .post(self.endpoint(&["auth", "register"]))
            .json(&body);
        self.authenticate(request, "Registration failed").await
    }

    async fn authenticate(
        &self,
        request: RequestBuilder,
        rejected: &str,
    ) -> Result<User, AuthError> {
        let response = request.send().await.map_err(|e| {
            warn!("Auth request failed: {}", e);
            AuthError::Unavailable
        })?;

        if response.status().is_success() {
            // The server answered; only the body is unusable.
            let body = response.json::<AuthResponse>().await.map_err(|e| {
                warn!("Unreadable auth response: {}", e);
                AuthError::Rejected(AUTH_FAILED.to_string())
            })?;
            return Ok(body.user);
        }

        let status = response.status();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| error_message(&body))
            .unwrap_or_else(|| rejected.to_string());
        debug!("Auth rejected with {}: {}", status, message);
        Err(AuthError::Rejected(message))
    }
}

/// Pulls a human-readable message out of an error body: the BFF's
/// `{error}` or the backend's `{detail}`.
fn error_message(body: &serde_json::Value) -> Option<String> {
    if let Ok(ErrorResponse { error }) = serde_json::from_value(body.clone()) {
        return Some(error);
    }
    body.get("detail")
        .and_then(|detail| detail.as_str())
        .map(str::to_string)
}
