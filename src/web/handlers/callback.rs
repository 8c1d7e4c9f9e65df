//! Targets of the links the provider emails out.
//!
//! Both exchange the `code` query parameter (with the PKCE verifier cookie
//! left by the originating form) for a session, then continue to a page.

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::web::{session, state::AppState};

const SIGN_IN_PATH: &str = "/signin";

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Email confirmation: a confirmed account lands on `/`.
pub async fn callback(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    exchange(&state, &headers, params, "/").await
}

/// Password recovery: the recovered session lands on the update form.
pub async fn update_password(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    exchange(&state, &headers, params, "/update-password").await
}

async fn exchange(
    state: &AppState,
    headers: &HeaderMap,
    params: CallbackParams,
    next: &str,
) -> Response {
    let mut response_headers = HeaderMap::new();
    session::clear_code_verifier(&mut response_headers, state.site());

    if let Some(err) = params.error {
        warn!(
            error = %err,
            description = params.error_description.as_deref().unwrap_or_default(),
            "Provider redirected with an error"
        );
        return (response_headers, Redirect::to(SIGN_IN_PATH)).into_response();
    }

    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        warn!("Callback without code");
        return (response_headers, Redirect::to(SIGN_IN_PATH)).into_response();
    };

    let Some(verifier) = session::code_verifier(headers) else {
        warn!("Callback without code verifier cookie");
        return (response_headers, Redirect::to(SIGN_IN_PATH)).into_response();
    };

    match state.provider().exchange_code(&code, &verifier).await {
        Ok(new_session) => {
            info!(user_id = %new_session.user.id, "Exchanged code for session");
            session::store_session(&mut response_headers, state.site(), &new_session);
            (response_headers, Redirect::to(next)).into_response()
        }
        Err(err) => {
            error!(kind = %err.kind(), "Failed to exchange code: {err}");
            (response_headers, Redirect::to(SIGN_IN_PATH)).into_response()
        }
    }
}
