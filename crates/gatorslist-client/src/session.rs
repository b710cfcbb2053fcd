use std::sync::{PoisonError, RwLock};

use tracing::{debug, info, warn};

use gatorslist_types::models::User;

use crate::api::MarketplaceClient;
use crate::store::SessionStore;

/// Why a login or registration did not go through. `Display` is the
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The server refused the credentials or the registration.
    #[error("{0}")]
    Rejected(String),

    #[error("Unable to reach the server. Please try again.")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Hydrating,
    Authenticated(User),
    Anonymous,
}

/// The signed-in user for the whole application. Created once at the root
/// and shared by reference; there is no global instance.
///
/// No token refresh and no expiry: a session lasts until `logout`.
pub struct AuthSession<S: SessionStore> {
    api: MarketplaceClient,
    store: S,
    state: RwLock<SessionState>,
}

impl<S: SessionStore> AuthSession<S> {
    pub fn new(api: MarketplaceClient, store: S) -> Self {
        Self {
            api,
            store,
            state: RwLock::new(SessionState::Uninitialized),
        }
    }

    /// Restores the persisted user, if any. A missing, unreadable or corrupt
    /// record leaves the session anonymous.
    pub fn hydrate(&self) -> SessionState {
        self.set_state(SessionState::Hydrating);

        let next = match self.store.load() {
            Ok(Some(record)) => match serde_json::from_str::<User>(&record) {
                Ok(user) => {
                    debug!("Restored session for {}", user.username);
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    warn!("Ignoring corrupt session record: {}", e);
                    SessionState::Anonymous
                }
            },
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!("Session store unreadable: {:#}", e);
                SessionState::Anonymous
            }
        };

        self.set_state(next.clone());
        next
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user(&self) -> Option<User> {
        match self.state() {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True until hydration has finished.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state(),
            SessionState::Uninitialized | SessionState::Hydrating
        )
    }

    /// On failure the current session is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self.api.login(username, password).await?;
        info!("Signed in as {}", user.username);
        self.persist(Some(user.clone()));
        Ok(user)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = self.api.register(username, email, password).await?;
        info!("Registered {}", user.username);
        self.persist(Some(user.clone()));
        Ok(user)
    }

    /// Clears the in-memory and persisted session before returning.
    pub fn logout(&self) {
        self.persist(None);
    }

    fn set_state(&self, next: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn persist(&self, user: Option<User>) {
        let result = match &user {
            Some(user) => serde_json::to_string(user)
                .map_err(anyhow::Error::from)
                .and_then(|record| self.store.save(&record)),
            None => self.store.clear(),
        };
        if let Err(e) = result {
            warn!("Failed to persist session: {:#}", e);
        }

        self.set_state(match user {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Anonymous,
        });
    }
}
