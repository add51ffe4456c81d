//! In-process cookie jar.
//!
//! The jar belongs to a single catalog service, so cookies are keyed by name
//! only and every stored cookie is sent with every request. A `Set-Cookie`
//! whose `Max-Age` or `Expires` lies in the past removes the cookie, and one
//! scoped to a foreign `Domain` is dropped.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cookie::Cookie;
use cookie::time::{Duration, OffsetDateTime};
use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use url::Url;

/// Name of the cookie that carries the session credential.
pub const SESSION_COOKIE: &str = "fetch-access-token";

#[derive(Debug, Default)]
pub struct SessionCookies {
    jar: Mutex<BTreeMap<String, String>>,
}

impl SessionCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a jar that already holds a session credential.
    pub fn with_session_token(token: &str) -> Self {
        let cookies = Self::new();
        cookies.insert(SESSION_COOKIE, token);
        cookies
    }

    pub fn insert(&self, name: &str, value: &str) {
        self.lock().insert(name.to_string(), value.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    /// Drops every cookie (used on logout).
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.jar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, raw: &str, url: &Url) {
        match parse_set_cookie(raw, url.host_str()) {
            Some(CookieUpdate::Set { name, value }) => {
                tracing::debug!(cookie = %name, "storing cookie");
                self.lock().insert(name, value);
            }
            Some(CookieUpdate::Remove { name }) => {
                tracing::debug!(cookie = %name, "removing cookie");
                self.lock().remove(&name);
            }
            None => tracing::debug!("ignoring unusable Set-Cookie header"),
        }
    }
}

impl CookieStore for SessionCookies {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        for header in cookie_headers {
            if let Ok(raw) = header.to_str() {
                self.apply(raw, url);
            }
        }
    }

    fn cookies(&self, _url: &Url) -> Option<HeaderValue> {
        let jar = self.lock();
        if jar.is_empty() {
            return None;
        }
        let joined = jar
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined).ok()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum CookieUpdate {
    Set { name: String, value: String },
    Remove { name: String },
}

fn parse_set_cookie(raw: &str, host: Option<&str>) -> Option<CookieUpdate> {
    let cookie = Cookie::parse(raw).ok()?;
    let name = cookie.name().trim();
    if name.is_empty() {
        return None;
    }
    if let (Some(domain), Some(host)) = (cookie.domain(), host)
        && !domain_matches(domain, host)
    {
        return None;
    }

    let value = cookie.value().trim().trim_matches('"');
    let expired = cookie.max_age().is_some_and(|age| age <= Duration::ZERO)
        || cookie
            .expires_datetime()
            .is_some_and(|at| at <= OffsetDateTime::now_utc());

    if expired || value.is_empty() {
        Some(CookieUpdate::Remove {
            name: name.to_string(),
        })
    } else {
        Some(CookieUpdate::Set {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Host-suffix match from RFC 6265 section 5.1.3.
fn domain_matches(domain: &str, host: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    host.eq_ignore_ascii_case(domain)
        || (host.len() > domain.len()
            && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
            && host[host.len() - domain.len()..].eq_ignore_ascii_case(domain))
}
