use crate::{
    auth::GoTrueClient,
    cli::telemetry,
    web::{self, AppState, SiteConfig},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{fmt, sync::Arc, time::Duration};
use tracing::debug;

pub struct Args {
    pub port: u16,
    pub site_url: String,
    pub auth_url: String,
    pub auth_anon_key: SecretString,
    pub auth_timeout_seconds: u64,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("site_url", &self.site_url)
            .field("auth_url", &self.auth_url)
            .field("auth_anon_key", &"***")
            .field("auth_timeout_seconds", &self.auth_timeout_seconds)
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the configuration is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Starting with {:?}", args);

    let site = SiteConfig::new(&args.site_url)
        .with_context(|| format!("Invalid site URL: {}", args.site_url))?;

    let provider = GoTrueClient::new(
        &args.auth_url,
        args.auth_anon_key,
        Duration::from_secs(args.auth_timeout_seconds),
    )
    .with_context(|| format!("Invalid auth provider URL: {}", args.auth_url))?;

    let state = AppState::new(Arc::new(provider), site);

    let result = web::new(args.port, state).await;

    telemetry::shutdown_tracer();

    result
}
