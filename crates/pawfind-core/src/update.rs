//! Reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. The route guard is consulted for
//! every search intent, so a session cleared by the client is honored on
//! the next interaction.

use pawfind_client::ApiError;

use crate::common::RequestId;
use crate::effects::AppEffect;
use crate::events::AppEvent;
use crate::login::{self, LOGIN_FAILED, LoginForm};
use crate::route::Route;
use crate::search;
use crate::state::AppState;

pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

pub fn update(app: &mut AppState, event: AppEvent) -> Vec<AppEffect> {
    match event {
        AppEvent::Init => {
            let route = if app.session.is_authenticated() {
                Route::Search
            } else {
                Route::Login
            };
            navigate(app, route)
        }
        AppEvent::Navigate(route) => navigate(app, route),
        AppEvent::SubmitLogin { name, email } => submit_login(app, &name, &email),
        AppEvent::Logout => logout(app),

        AppEvent::LoginFinished { req, result } => handle_login(app, req, result),
        AppEvent::LogoutFinished { req, result } => {
            if !app.logout_request.finish_if_active(req) {
                return vec![];
            }
            match result {
                Ok(()) => app.notices.info("Logged out."),
                Err(err) => {
                    tracing::warn!(error = %err, "logout request failed");
                    app.notices
                        .warn(format!("Logout request failed ({err}); local session cleared."));
                }
            }
            vec![]
        }

        AppEvent::BreedsLoaded { req, result } => {
            if stage_rejected(&result) && app.search.breeds_request.is_active(req) {
                return expire_session(app);
            }
            search::handle_breeds(&mut app.search, &mut app.notices, req, result)
        }
        AppEvent::SearchLoaded { req, result } => {
            if stage_rejected(&result) && app.search.search_request.is_active(req) {
                return expire_session(app);
            }
            search::handle_search(&mut app.search, &mut app.notices, req, result)
        }
        AppEvent::DogsLoaded { req, ids, result } => {
            if stage_rejected(&result) && app.search.hydrate_request.is_active(req) {
                return expire_session(app);
            }
            search::handle_dogs(&mut app.search, &mut app.notices, req, &ids, result)
        }

        intent => handle_search_intent(app, intent),
    }
}

fn navigate(app: &mut AppState, requested: Route) -> Vec<AppEffect> {
    app.route = requested;
    let view = app.view();
    if view != requested {
        tracing::debug!(?requested, ?view, "route guard redirected");
        app.route = view;
    }
    match view {
        Route::Search => search::start(&mut app.search),
        Route::Login => vec![],
    }
}

fn submit_login(app: &mut AppState, name: &str, email: &str) -> Vec<AppEffect> {
    if app.login.is_submitting() {
        app.notices.info("A login is already in progress.");
        return vec![];
    }
    let (name, email) = match login::validate(name, email) {
        Ok(fields) => fields,
        Err(message) => {
            app.login.error = Some(message);
            return vec![];
        }
    };
    app.login.error = None;
    app.login.pending_name = Some(name.clone());
    let req = app.login_request.begin();
    vec![AppEffect::Login { req, name, email }]
}

fn handle_login(
    app: &mut AppState,
    req: RequestId,
    result: Result<(), ApiError>,
) -> Vec<AppEffect> {
    if !app.login_request.finish_if_active(req) {
        return vec![];
    }
    let name = app.login.pending_name.take();
    match result {
        Ok(()) => {
            app.session.set_authenticated(true);
            app.login = LoginForm::default();
            if let Some(name) = name {
                app.notices.info(format!("Welcome, {name}!"));
            }
            navigate(app, Route::Search)
        }
        Err(err) => {
            tracing::warn!(error = %err, "login rejected");
            app.login.error = Some(LOGIN_FAILED.to_string());
            vec![]
        }
    }
}

/// Logs out locally right away; the remote call only invalidates the
/// credential on the service side.
fn logout(app: &mut AppState) -> Vec<AppEffect> {
    app.session.set_authenticated(false);
    app.search.reset();
    app.login = LoginForm::default();
    app.login_request.cancel();
    app.route = Route::Login;
    let req = app.logout_request.begin();
    vec![AppEffect::Logout { req }]
}

fn handle_search_intent(app: &mut AppState, intent: AppEvent) -> Vec<AppEffect> {
    if app.view() != Route::Search {
        app.route = Route::Login;
        app.notices.warn("Log in to search for dogs.");
        return vec![];
    }
    let state = &mut app.search;
    let notices = &mut app.notices;
    match intent {
        AppEvent::SelectBreed(breed) => search::select_breed(state, notices, breed.as_deref()),
        AppEvent::SetPage(page) => search::set_page(state, notices, page),
        AppEvent::NextPage => search::next_page(state, notices),
        AppEvent::PrevPage => search::prev_page(state, notices),
        AppEvent::SetPageSize(size) => search::set_page_size(state, notices, size),
        AppEvent::ToggleSort => search::toggle_sort(state),
        AppEvent::SetSortField(field) => search::set_sort_field(state, field),
        AppEvent::RefreshBreeds => search::refresh_breeds(state),
        AppEvent::ShowPhoto(index) => search::show_photo(state, notices, index),
        AppEvent::ClosePhoto => search::close_photo(state),
        other => {
            tracing::debug!(?other, "ignoring event");
            vec![]
        }
    }
}

fn stage_rejected<T>(result: &Result<T, ApiError>) -> bool {
    result.as_ref().is_err_and(ApiError::is_unauthorized)
}

fn expire_session(app: &mut AppState) -> Vec<AppEffect> {
    tracing::info!("session expired; returning to login");
    app.session.set_authenticated(false);
    app.search.reset();
    app.route = Route::Login;
    app.notices.warn(SESSION_EXPIRED);
    vec![]
}
