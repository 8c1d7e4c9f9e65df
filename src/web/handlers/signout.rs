use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{error, info};

use crate::web::{session, state::AppState};

/// Revoke the provider session (best effort) and drop the cookies.
pub async fn signout(Extension(state): Extension<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(access_token) = session::session_tokens(&headers).access_token {
        match state.provider().sign_out(&access_token).await {
            Ok(()) => info!("Signed out"),
            Err(err) => error!(kind = %err.kind(), "Failed to sign out: {err}"),
        }
    }

    let mut response_headers = HeaderMap::new();
    session::clear_session(&mut response_headers, state.site());

    (response_headers, Redirect::to("/")).into_response()
}
