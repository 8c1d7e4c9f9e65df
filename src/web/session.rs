//! Session cookies and the per-request session context.
//!
//! The provider session lives in two `HttpOnly` cookies. Every page resolves
//! them through [`resolve`] before rendering, so pages never talk to the
//! provider about the session themselves. An access token that is missing or
//! rejected is renewed with the refresh token and both cookies are rewritten.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::state::{AppState, SiteConfig};
use crate::auth::{AuthErrorKind, AuthProvider, PkceVerifier, Session, SessionTokens, User};

pub const ACCESS_TOKEN_COOKIE: &str = "aied_access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "aied_refresh_token";
pub const CODE_VERIFIER_COOKIE: &str = "aied_code_verifier";

// Refresh tokens outlive the access token; browsers cap Max-Age at 400 days.
const REFRESH_TOKEN_TTL_SECONDS: u64 = 400 * 24 * 60 * 60;
const CODE_VERIFIER_TTL_SECONDS: u64 = 60 * 60;
const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 60 * 60;

/// Session resolved for the current request; `None` when signed out.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    session: Arc<Option<Session>>,
}

impl SessionContext {
    #[must_use]
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session: Arc::new(session),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        Option::as_ref(&self.session)
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session().map(|session| &session.user)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// What session resolution did to the cookies.
#[derive(Debug)]
enum Renewal {
    Unchanged,
    Renewed(Session),
    Expired,
}

async fn lookup(provider: &dyn AuthProvider, tokens: &SessionTokens) -> Option<Session> {
    if tokens.access_token.is_none() {
        return None;
    }
    let session = provider.get_session(tokens).await;
    debug!(authenticated = session.is_some(), "session resolved");
    session
}

async fn lookup_or_renew(
    provider: &dyn AuthProvider,
    tokens: &SessionTokens,
) -> (SessionContext, Renewal) {
    if let Some(session) = lookup(provider, tokens).await {
        return (SessionContext::new(Some(session)), Renewal::Unchanged);
    }

    let Some(refresh_token) = tokens.refresh_token.as_deref() else {
        return (SessionContext::default(), Renewal::Unchanged);
    };

    match provider.refresh_session(refresh_token).await {
        Ok(session) => {
            debug!("session renewed with refresh token");
            (SessionContext::new(Some(session.clone())), Renewal::Renewed(session))
        }
        Err(err) if err.kind() == AuthErrorKind::CredentialsInvalid => {
            debug!("refresh token rejected: {err}");
            (SessionContext::default(), Renewal::Expired)
        }
        Err(err) => {
            warn!(kind = %err.kind(), "Failed to renew session: {err}");
            (SessionContext::default(), Renewal::Unchanged)
        }
    }
}

/// Page middleware: resolve the session once, renewing it when only the
/// refresh token is still good, and hand it to handlers as [`SessionContext`].
///
/// Handlers that store a session of their own win over the renewal.
pub async fn resolve(mut request: Request, next: Next) -> Response {
    let Some(state) = request.extensions().get::<Arc<AppState>>().cloned() else {
        error!("Application state missing from request extensions");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let tokens = session_tokens(request.headers());
    let (context, renewal) = lookup_or_renew(state.provider(), &tokens).await;
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if !sets_cookie(response.headers(), ACCESS_TOKEN_COOKIE) {
        match renewal {
            Renewal::Renewed(session) => {
                store_session(response.headers_mut(), state.site(), &session);
            }
            Renewal::Expired => clear_session(response.headers_mut(), state.site()),
            Renewal::Unchanged => {}
        }
    }

    response
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<Self>() {
            return Ok(context.clone());
        }

        // Outside the page middleware: no renewal, the cookies could not be rewritten.
        let Some(state) = parts.extensions.get::<Arc<AppState>>().cloned() else {
            error!("Application state missing from request extensions");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        };

        let session = lookup(state.provider(), &session_tokens(&parts.headers)).await;

        Ok(Self::new(session))
    }
}

/// Read one cookie from every `Cookie` header on the request.
#[must_use]
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == name && !val.trim().is_empty()).then(|| val.trim().to_string())
        })
}

#[must_use]
pub fn session_tokens(headers: &HeaderMap) -> SessionTokens {
    SessionTokens {
        access_token: cookie_value(headers, ACCESS_TOKEN_COOKIE),
        refresh_token: cookie_value(headers, REFRESH_TOKEN_COOKIE),
    }
}

#[must_use]
pub fn code_verifier(headers: &HeaderMap) -> Option<PkceVerifier> {
    cookie_value(headers, CODE_VERIFIER_COOKIE).and_then(|value| PkceVerifier::parse(&value))
}

/// Append `Set-Cookie` headers storing `session`.
pub fn store_session(headers: &mut HeaderMap, site: &SiteConfig, session: &Session) {
    let access_ttl = if session.expires_in == 0 {
        DEFAULT_ACCESS_TOKEN_TTL_SECONDS
    } else {
        session.expires_in
    };

    append(
        headers,
        cookie(site, ACCESS_TOKEN_COOKIE, &session.access_token, access_ttl),
    );
    append(
        headers,
        cookie(
            site,
            REFRESH_TOKEN_COOKIE,
            &session.refresh_token,
            REFRESH_TOKEN_TTL_SECONDS,
        ),
    );
}

pub fn clear_session(headers: &mut HeaderMap, site: &SiteConfig) {
    append(headers, cookie(site, ACCESS_TOKEN_COOKIE, "", 0));
    append(headers, cookie(site, REFRESH_TOKEN_COOKIE, "", 0));
}

/// Remember the PKCE verifier until the emailed link comes back.
pub fn store_code_verifier(headers: &mut HeaderMap, site: &SiteConfig, verifier: &PkceVerifier) {
    append(
        headers,
        cookie(
            site,
            CODE_VERIFIER_COOKIE,
            verifier.as_str(),
            CODE_VERIFIER_TTL_SECONDS,
        ),
    );
}

pub fn clear_code_verifier(headers: &mut HeaderMap, site: &SiteConfig) {
    append(headers, cookie(site, CODE_VERIFIER_COOKIE, "", 0));
}

fn sets_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| {
            value
                .split_once('=')
                .is_some_and(|(key, _)| key.trim() == name)
        })
}

fn append(headers: &mut HeaderMap, cookie: Result<HeaderValue, InvalidHeaderValue>) {
    match cookie {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(err) => error!("Failed to build cookie header: {err}"),
    }
}

fn cookie(
    site: &SiteConfig,
    name: &str,
    value: &str,
    ttl_seconds: u64,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}");
    if site.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}
