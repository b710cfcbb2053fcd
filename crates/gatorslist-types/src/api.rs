use serde::{Deserialize, Serialize};

use crate::models::{ListingType, User};

// -- Backend records --
//
// Field names follow the backend's lowercase convention. The snake_case
// spellings of the older `/posts` schema are accepted as aliases.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ListingType,
    pub title: String,
    pub price: f64,
    #[serde(default, alias = "image_key")]
    pub imagekey: Option<String>,
    #[serde(default, alias = "created_at")]
    pub createdat: Option<String>,
    #[serde(default, alias = "sold_at")]
    pub soldat: Option<String>,
    #[serde(default)]
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    #[serde(default)]
    pub conversationid: Option<String>,
    #[serde(default)]
    pub senderid: Option<String>,
    #[serde(default)]
    pub recipientid: Option<String>,
    #[serde(default)]
    pub listingid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub isread: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversationid: String,
    #[serde(default)]
    pub lastmessage: String,
    #[serde(default)]
    pub lasttimestamp: Option<String>,
    #[serde(default)]
    pub listingid: String,
    #[serde(default)]
    pub listingtitle: String,
    #[serde(default)]
    pub otheruserid: String,
    #[serde(default)]
    pub otherusername: String,
}

/// Account as returned by `/accounts/by-username/{username}`. Anything else
/// the backend sends (role, password hash, flags) is dropped on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

// -- Listings --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateListingRequest {
    #[serde(rename = "type")]
    pub kind: ListingType,
    pub title: String,
    pub price: f64,
    pub image_key: Option<String>,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedListing {
    pub id: String,
}

// -- Auth --

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
}

// -- Messages --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub senderid: String,
    pub recipientid: String,
    pub listingid: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversationid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: String,
    pub conversationid: String,
}

/// Result of a find-conversation lookup. `None` means no conversation exists
/// yet, or the lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLookup {
    pub conversationid: Option<String>,
}

// -- Uploads --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub key: String,
}

// -- Errors --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
