use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of remote-call failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Request never reached the service, or the response never arrived.
    Network,
    /// Login was rejected.
    Authentication,
    /// A guarded endpoint rejected the session (401/403).
    Unauthorized,
    /// Any other non-success status.
    HttpStatus,
    /// Response body could not be decoded.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Authentication => write!(f, "authentication"),
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from a remote call.
///
/// Cloneable so it can travel inside controller events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display.
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("could not connect: {err}")
        } else {
            format!("request failed: {err}")
        };
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn authentication(status: u16) -> Self {
        Self {
            kind: ApiErrorKind::Authentication,
            message: format!("login rejected (HTTP {status})"),
            status: Some(status),
        }
    }

    pub fn unauthorized(status: u16) -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: format!("session rejected (HTTP {status})"),
            status: Some(status),
        }
    }

    /// Creates an HTTP status error, pulling a message out of a JSON body
    /// when the service sends one.
    pub fn http_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .or_else(|| json.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
            });
        let message = match detail {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ApiErrorKind::HttpStatus,
            message,
            status: Some(status),
        }
    }

    pub fn parse(err: &serde_json::Error) -> Self {
        Self::new(ApiErrorKind::Parse, format!("unexpected response body: {err}"))
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_extracts_json_message() {
        let err = ApiError::http_status(400, r#"{"message":"size must be <= 100"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 400: size must be <= 100");
        assert_eq!(err.status, Some(400));
    }

    #[test]
    fn http_status_falls_back_to_plain_body() {
        assert_eq!(
            ApiError::http_status(500, "Internal Server Error").message,
            "HTTP 500: Internal Server Error"
        );
        assert_eq!(ApiError::http_status(502, "").message, "HTTP 502");
    }

    #[test]
    fn unauthorized_is_flagged() {
        assert!(ApiError::unauthorized(401).is_unauthorized());
        assert!(!ApiError::authentication(401).is_unauthorized());
    }
}
