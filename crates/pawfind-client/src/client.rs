//! Catalog service client.
//!
//! Every request carries the session cookie through the installed cookie
//! store. There are no retries and no timeout override: failures go back to
//! the caller as they happened.

use std::sync::Arc;

use bytes::Bytes;
use pawfind_types::{Dog, LoginRequest, SearchQuery, SearchResults};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::cookies::SessionCookies;
use crate::error::{ApiError, ApiErrorKind};
use crate::session::AuthSession;

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const BREEDS_PATH: &str = "/dogs/breeds";
const SEARCH_PATH: &str = "/dogs/search";
const DOGS_PATH: &str = "/dogs/";

/// Raw response: status plus body bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::parse(&e))
    }

    /// Converts non-success statuses into errors.
    fn checked(self) -> Result<Self, ApiError> {
        match self.status {
            401 | 403 => Err(ApiError::unauthorized(self.status)),
            _ if self.is_success() => Ok(self),
            status => Err(ApiError::http_status(status, &self.text())),
        }
    }
}

/// Authenticated client for the catalog service.
///
/// Cloning is cheap; clones share the connection pool, cookie jar, and
/// session flag.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    cookies: Arc<SessionCookies>,
    session: AuthSession,
}

impl ApiClient {
    pub fn new(
        base_url: Url,
        cookies: Arc<SessionCookies>,
        session: AuthSession,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|e| ApiError::network(&e))?;
        Ok(Self {
            http,
            base_url: with_trailing_slash(base_url),
            cookies,
            session,
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    /// Sends a GET to a guarded endpoint.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, ApiError> {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(request, path, true).await
    }

    /// Sends a POST with a JSON body to a guarded endpoint.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.request(Method::POST, path)?.query(query).json(body);
        self.send(request, path, true).await
    }

    /// Logs in. Any status other than 200 is an authentication failure.
    ///
    /// On success the service sets the session cookie, which the jar keeps.
    pub async fn login(&self, name: &str, email: &str) -> Result<(), ApiError> {
        let request = self
            .request(Method::POST, LOGIN_PATH)?
            .json(&LoginRequest { name, email });
        let response = self.send(request, LOGIN_PATH, false).await?;
        if response.status == 200 {
            Ok(())
        } else {
            Err(ApiError::authentication(response.status))
        }
    }

    /// Ends the session. Local credentials are dropped whatever the
    /// service answers.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = match self.request(Method::POST, LOGOUT_PATH) {
            Ok(request) => self
                .send(request, LOGOUT_PATH, false)
                .await
                .and_then(ApiResponse::checked)
                .map(|_| ()),
            Err(err) => Err(err),
        };
        self.cookies.clear();
        self.session.set_authenticated(false);
        result
    }

    pub async fn breeds(&self) -> Result<Vec<String>, ApiError> {
        self.get(BREEDS_PATH, &[]).await?.checked()?.json()
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ApiError> {
        self.get(SEARCH_PATH, &query.to_pairs())
            .await?
            .checked()?
            .json()
    }

    /// Fetches full records for `ids`. The response order is whatever the
    /// service returns.
    pub async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, ApiError> {
        self.post(DOGS_PATH, &[], ids).await?.checked()?.json()
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            ApiError::new(
                ApiErrorKind::Network,
                format!("invalid request path '{path}': {e}"),
            )
        })?;
        Ok(self.http.request(method, url))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        path: &str,
        guarded: bool,
    ) -> Result<ApiResponse, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "request failed");
            ApiError::network(&e)
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| ApiError::network(&e))?;
        tracing::debug!(path, status, bytes = body.len(), "response received");

        if guarded && matches!(status, 401 | 403) && self.session.is_authenticated() {
            tracing::warn!(path, status, "session rejected; marking unauthenticated");
            self.session.set_authenticated(false);
        }

        Ok(ApiResponse { status, body })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
