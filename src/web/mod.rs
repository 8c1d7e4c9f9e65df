//! HTTP surface: server-rendered pages, auth callbacks and health.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

pub mod handlers;
pub mod session;
pub mod state;
pub mod views;

pub use session::SessionContext;
pub use state::{AppState, SiteConfig};

use handlers::{
    callback, dashboard, forgot_password, health, home, signin, signout, signup, update_password,
};

/// Build the application router with its middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    let pages = Router::new()
        .route("/", get(home::home))
        .route("/signin", get(signin::page).post(signin::submit))
        .route("/signup", get(signup::page).post(signup::submit))
        .route(
            "/forgot-password",
            get(forgot_password::page).post(forgot_password::submit),
        )
        .route(
            "/update-password",
            get(update_password::page).post(update_password::submit),
        )
        .route("/dashboard", get(dashboard::dashboard))
        .route_layer(middleware::from_fn(session::resolve));

    Router::new()
        .merge(pages)
        .route("/api/auth/callback", get(callback::callback))
        .route("/api/auth/update-password", get(callback::update_password))
        .route("/api/auth/signout", post(signout::signout))
        .route("/health", get(health::health).options(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, state: AppState) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {err}");
                std::future::pending::<()>().await;
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
