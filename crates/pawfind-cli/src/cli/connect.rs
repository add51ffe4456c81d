//! Runtime construction shared by the commands.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use pawfind_client::{ApiClient, AuthSession, SessionCookies};
use pawfind_core::config::{Config, SESSION_TOKEN_ENV};
use pawfind_core::{AppEvent, Route, Runtime};

use crate::render;

/// Builds a runtime against the configured catalog. A configured session
/// token is placed in the cookie jar before the session flag is derived.
pub fn runtime(config: &Config) -> Result<Runtime> {
    let base_url = config.api_base_url()?;
    let page_size = config.page_size()?;

    let cookies = Arc::new(match config.session_token() {
        Some(token) => SessionCookies::with_session_token(token),
        None => SessionCookies::new(),
    });
    let session = AuthSession::new();
    session.initialize(&cookies);

    tracing::debug!(%base_url, page_size, "connecting to catalog");
    let client = ApiClient::new(base_url, cookies, session).context("build HTTP client")?;
    Ok(Runtime::new(client, page_size))
}

/// Gets the runtime onto the search view, logging in first when the
/// session is not authenticated, and waits for the first search.
pub async fn enter_search(
    runtime: &mut Runtime,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    if runtime.client().session().is_authenticated() {
        runtime.dispatch(AppEvent::Init);
    } else {
        let (Some(name), Some(email)) = (name, email) else {
            bail!("--name and --email are required unless {SESSION_TOKEN_ENV} is set");
        };
        runtime.dispatch(AppEvent::SubmitLogin {
            name: name.to_string(),
            email: email.to_string(),
        });
    }
    runtime.settle().await;
    render::print_notices(&mut runtime.state.notices);

    if let Some(error) = &runtime.state.login.error {
        bail!("{error}");
    }
    if runtime.state.view() != Route::Search {
        bail!("Not logged in");
    }
    Ok(())
}
