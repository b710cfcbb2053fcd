//! One translation function per entity, from backend record to the
//! application's camelCase model. Nothing else in the crate touches backend
//! field names.

use gatorslist_types::api::{AccountRecord, ConversationRecord, ListingRecord, MessageRecord};
use gatorslist_types::models::{Account, ConversationPreview, FeaturedItem, Listing, Message};

use crate::object_storage::ObjectStorage;

pub fn map_listing(raw: ListingRecord, storage: &ObjectStorage) -> Listing {
    Listing {
        id: raw.id,
        kind: raw.kind,
        title: raw.title,
        price: raw.price,
        // The backend stores "" for "no image".
        image_url: raw
            .imagekey
            .filter(|key| !key.trim().is_empty())
            .map(|key| storage.build_object_url(&key)),
        created_at: raw.createdat,
        sold_at: raw.soldat,
        user: raw.user,
    }
}

/// Listings without an image have nothing to show in the carousel.
pub fn map_featured(listing: Listing) -> Option<FeaturedItem> {
    let image_url = listing.image_url?;
    Some(FeaturedItem {
        id: listing.id,
        title: listing.title,
        image_url,
    })
}

pub fn map_message(raw: MessageRecord) -> Message {
    Message {
        id: raw.id,
        conversation_id: raw.conversationid.unwrap_or_default(),
        sender_id: raw.senderid.unwrap_or_default(),
        recipient_id: raw.recipientid.unwrap_or_default(),
        listing_id: raw.listingid.unwrap_or_default(),
        message: raw.message.unwrap_or_default(),
        timestamp: raw.timestamp,
        is_read: raw.isread.unwrap_or(false),
    }
}

pub fn map_conversation(raw: ConversationRecord) -> ConversationPreview {
    ConversationPreview {
        conversation_id: raw.conversationid,
        last_message: raw.lastmessage,
        last_timestamp: raw.lasttimestamp,
        listing_id: raw.listingid,
        listing_title: raw.listingtitle,
        other_user_id: raw.otheruserid,
        other_username: raw.otherusername,
    }
}

pub fn map_account(raw: AccountRecord) -> Account {
    Account {
        id: raw.id,
        username: raw.username,
        email: raw.email,
    }
}
