//! Client-side data access for the marketplace: typed calls to the BFF
//! routes, backend-to-application field mapping, image URL resolution, the
//! signed-in session, the multi-step page flows and the browse helpers.

pub mod api;
pub mod browse;
pub mod flows;
pub mod mapping;
pub mod object_storage;
pub mod session;
pub mod store;

pub use api::{ClientError, MarketplaceClient};
pub use flows::{FlowError, ImageUpload};
pub use object_storage::ObjectStorage;
pub use session::{AuthError, AuthSession, SessionState};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
