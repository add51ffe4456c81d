//! Application state.
//!
//! Owned by the runtime and mutated only by the reducer in `update.rs`.

use pawfind_client::AuthSession;

use crate::common::{LatestOnly, Notices};
use crate::login::LoginForm;
use crate::route::{self, Route};
use crate::search::SearchState;

#[derive(Debug)]
pub struct AppState {
    /// Shared with the HTTP client, which clears it on a rejected session.
    pub session: AuthSession,
    /// Route last requested by the user. Use [`AppState::view`] to render.
    pub route: Route,
    pub login: LoginForm,
    pub search: SearchState,
    pub notices: Notices,
    pub login_request: LatestOnly,
    pub logout_request: LatestOnly,
}

impl AppState {
    pub fn new(session: AuthSession, page_size: u32) -> Self {
        Self {
            session,
            route: Route::default(),
            login: LoginForm::default(),
            search: SearchState::new(page_size),
            notices: Notices::default(),
            login_request: LatestOnly::default(),
            logout_request: LatestOnly::default(),
        }
    }

    /// The view to render, after the route guard.
    pub fn view(&self) -> Route {
        route::guard(self.route, &self.session)
    }

    /// True while any remote call issued by the reducer is unanswered.
    pub fn has_pending(&self) -> bool {
        self.login_request.has_active()
            || self.logout_request.has_active()
            || self.search.has_pending()
    }
}
