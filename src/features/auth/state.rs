//! Session state for the client. The context is an explicit, cloneable
//! handle passed to whatever needs the current user; clones share one value.
//! Only account metadata returned by the API is kept, never credentials.

use super::types::User;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Holds zero or one authenticated user.
#[derive(Clone, Debug)]
pub struct AuthContext {
    session: Arc<watch::Sender<Option<User>>>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    /// Builds an empty context.
    #[must_use]
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            session: Arc::new(session),
        }
    }

    /// Replaces the held user, typically after sign-up or login.
    pub fn set_user(&self, user: User) {
        debug!(user_id = %user.id, "session user set");
        self.session.send_replace(Some(user));
    }

    /// Clears the held user, typically on logout.
    pub fn clear(&self) {
        debug!("session cleared");
        self.session.send_replace(None);
    }

    /// Snapshot of the current user.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.session.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Receiver that observes the current user and every later change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.session.subscribe()
    }
}
