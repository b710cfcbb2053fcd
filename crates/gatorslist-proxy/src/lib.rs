//! Backend-for-frontend routes: each handler forwards one inbound request to
//! the marketplace backend and adapts the answer, degrading failures to
//! empty or error values instead of propagating them.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod listings;
pub mod messages;
mod relay;
pub mod router;
pub mod state;
pub mod upload;

pub use router::api_routes;
pub use state::{AppState, AppStateInner};
