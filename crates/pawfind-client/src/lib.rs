//! Authenticated HTTP client for the dog catalog service.
//!
//! - `client`: request sending with the session cookie attached
//! - `session`: the process-wide authentication flag
//! - `cookies`: in-process cookie jar holding the session credential
//! - `error`: error taxonomy for remote calls

pub mod client;
pub mod cookies;
pub mod error;
pub mod session;

pub use client::{ApiClient, ApiResponse};
pub use cookies::{SESSION_COOKIE, SessionCookies};
pub use error::{ApiError, ApiErrorKind};
pub use session::AuthSession;
