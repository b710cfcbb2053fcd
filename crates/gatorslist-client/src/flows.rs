//! Multi-step flows the pages run: contacting a seller, replying in a thread
//! and creating a listing with an image. Each returns a `FlowError` whose
//! `Display` is the message shown to the user.

use bytes::Bytes;
use tracing::{debug, info};

use gatorslist_types::api::SendMessageRequest;
use gatorslist_types::models::{CreateListingInput, Listing, Message, User};

use crate::api::MarketplaceClient;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Could not find seller account.")]
    SellerNotFound,

    #[error("Failed to start conversation. Please try again.")]
    ConversationFailed,

    /// Replies need an existing message to learn the other party from.
    #[error("This conversation has no messages yet.")]
    EmptyThread,

    #[error("Message cannot be empty.")]
    EmptyMessage,

    #[error("Failed to send message. Please try again.")]
    SendFailed,

    #[error("Image upload failed. Please try again.")]
    UploadFailed,

    #[error("Failed to create listing. Please try again.")]
    CreateFailed,
}

/// An image picked on the create form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Opening line sent when a buyer first contacts a seller.
pub fn greeting(listing: &Listing) -> String {
    format!("Hi! I'm interested in \"{}\".", listing.title)
}

impl MarketplaceClient {
    /// Conversation id between `me` and the listing's owner, opening one with
    /// a greeting when none exists yet.
    pub async fn start_conversation(
        &self,
        listing: &Listing,
        me: &User,
    ) -> Result<String, FlowError> {
        let seller = self
            .lookup_account(&listing.user)
            .await
            .ok_or(FlowError::SellerNotFound)?;

        if let Some(existing) = self.find_conversation(&listing.id, &me.id, &seller.id).await {
            debug!("Reusing conversation {} for listing {}", existing, listing.id);
            return Ok(existing);
        }

        let request = SendMessageRequest {
            senderid: me.id.clone(),
            recipientid: seller.id,
            listingid: listing.id.clone(),
            message: greeting(listing),
            conversationid: None,
        };
        let sent = self
            .send_message(&request)
            .await
            .ok_or(FlowError::ConversationFailed)?;
        info!("Opened conversation {} on listing {}", sent.conversationid, listing.id);
        Ok(sent.conversationid)
    }

    /// Sends `text` to the other party of `thread` and returns the refreshed
    /// thread. The recipient and listing come from the first message.
    pub async fn reply_in_thread(
        &self,
        conversation_id: &str,
        me: &User,
        thread: &[Message],
        text: &str,
    ) -> Result<Vec<Message>, FlowError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FlowError::EmptyMessage);
        }
        let first = thread.first().ok_or(FlowError::EmptyThread)?;

        let recipient = if first.sender_id == me.id {
            &first.recipient_id
        } else {
            &first.sender_id
        };
        let request = SendMessageRequest {
            senderid: me.id.clone(),
            recipientid: recipient.clone(),
            listingid: first.listing_id.clone(),
            message: text.to_string(),
            conversationid: Some(conversation_id.to_string()),
        };
        self.send_message(&request)
            .await
            .ok_or(FlowError::SendFailed)?;

        Ok(self.fetch_messages(conversation_id).await)
    }

    /// Uploads `image` first, if any; a failed upload aborts before the
    /// listing is created. Returns the new listing id.
    pub async fn create_listing_with_image(
        &self,
        input: &CreateListingInput,
        image: Option<ImageUpload>,
        user_name: &str,
    ) -> Result<String, FlowError> {
        let mut input = input.clone();
        if let Some(image) = image {
            input.image_key = self
                .upload_image(&image.file_name, &image.content_type, image.data)
                .await
                .ok_or(FlowError::UploadFailed)?;
        }

        self.create_listing(&input, user_name)
            .await
            .ok_or(FlowError::CreateFailed)
    }
}
