//! Route guard.

use pawfind_client::AuthSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Search,
}

/// Resolves the route to render. The search view requires an authenticated
/// session; everything else falls back to the login view.
///
/// Evaluated on every navigation, never cached.
pub fn guard(requested: Route, session: &AuthSession) -> Route {
    match requested {
        Route::Search if session.is_authenticated() => Route::Search,
        _ => Route::Login,
    }
}
