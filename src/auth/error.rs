//! Typed failures returned by the auth provider adapter.

use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Closed set of failure kinds the pages may react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthErrorKind {
    CredentialsInvalid,
    NetworkFailure,
    RateLimited,
    Unknown,
}

impl AuthErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CredentialsInvalid => "credentials_invalid",
            Self::NetworkFailure => "network_failure",
            Self::RateLimited => "rate_limited",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed provider operation. `message` is the provider's human-readable text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    kind: AuthErrorKind,
    message: String,
}

impl AuthError {
    #[must_use]
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Unknown, message)
    }

    #[must_use]
    pub fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Build an error from a non-success provider response.
    ///
    /// GoTrue has used several error shapes over time (`msg`, `error_description`,
    /// `message`, `error`); the first one present wins.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &Value) -> Self {
        let message = ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .filter(|message| !message.trim().is_empty())
            .map_or_else(
                || {
                    status
                        .canonical_reason()
                        .unwrap_or("Unexpected response from auth provider")
                        .to_string()
                },
                ToString::to_string,
            );

        Self::new(classify(status, body), message)
    }
}

fn classify(status: StatusCode, body: &Value) -> AuthErrorKind {
    let error_code = body
        .get("error_code")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let error = body.get("error").and_then(Value::as_str).unwrap_or_default();

    if status == StatusCode::TOO_MANY_REQUESTS || error_code.starts_with("over_") {
        return AuthErrorKind::RateLimited;
    }

    if status == StatusCode::UNAUTHORIZED
        || error_code == "invalid_credentials"
        || error_code.starts_with("refresh_token_")
        || error == "invalid_grant"
    {
        return AuthErrorKind::CredentialsInvalid;
    }

    AuthErrorKind::Unknown
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() || err.is_connect() || err.is_request() {
            AuthErrorKind::NetworkFailure
        } else {
            AuthErrorKind::Unknown
        };

        Self::new(kind, err.to_string())
    }
}
