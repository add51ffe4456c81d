//! Auth session store.
//!
//! One boolean shared by the HTTP client, the controller, and the route
//! guard. Handles are cheap to clone and all observe the same flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cookies::{SESSION_COOKIE, SessionCookies};

#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    authenticated: Arc<AtomicBool>,
}

impl AuthSession {
    /// Creates an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the flag from the presence of the session credential.
    ///
    /// A missing cookie is the logged-out state, not an error.
    pub fn initialize(&self, cookies: &SessionCookies) {
        let present = cookies.contains(SESSION_COOKIE);
        tracing::debug!(present, "initialized auth session from cookie jar");
        self.set_authenticated(present);
    }

    pub fn set_authenticated(&self, value: bool) {
        self.authenticated.store(value, Ordering::SeqCst);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
}
