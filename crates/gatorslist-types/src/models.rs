use serde::{Deserialize, Serialize};

/// A listing is either an item offered for sale or a request for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Item,
    Request,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Request => "request",
        }
    }
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marketplace listing as the application sees it. Image keys are already
/// resolved to object-storage URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ListingType,
    pub title: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
    pub sold_at: Option<String>,
    /// Display name of the owning user.
    pub user: String,
}

impl Listing {
    /// A sold timestamp is terminal; listings without one are still active.
    pub fn is_sold(&self) -> bool {
        self.sold_at.is_some()
    }
}

/// Reduced projection of a listing for the landing-page carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

/// The signed-in user. This is also the exact shape of the persisted session
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Public view of an account, used to resolve a username to an id for
/// messaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub listing_id: String,
    pub message: String,
    /// `None` until the backend assigns one.
    pub timestamp: Option<String>,
    pub is_read: bool,
}

/// Aggregated view of a conversation for the inbox. Built by the backend,
/// never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPreview {
    pub conversation_id: String,
    pub last_message: String,
    pub last_timestamp: Option<String>,
    pub listing_id: String,
    pub listing_title: String,
    pub other_user_id: String,
    pub other_username: String,
}

/// Form input for a new listing, before it is attributed to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListingInput {
    pub kind: ListingType,
    pub title: String,
    pub price: f64,
    /// Object key returned by an upload, empty when no image was attached.
    pub image_key: String,
}
