use crate::cli::{
    actions::{server::Args, Action},
    commands::{
        auth::{ARG_AUTH_ANON_KEY, ARG_AUTH_TIMEOUT_SECONDS, ARG_AUTH_URL},
        ARG_PORT, ARG_SITE_URL,
    },
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let site_url = matches
        .get_one::<String>(ARG_SITE_URL)
        .cloned()
        .context("missing required argument: --site-url")?;
    let auth_url = matches
        .get_one::<String>(ARG_AUTH_URL)
        .cloned()
        .context("missing required argument: --auth-url")?;
    let auth_anon_key = matches
        .get_one::<String>(ARG_AUTH_ANON_KEY)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --auth-anon-key")?;
    let auth_timeout_seconds = matches
        .get_one::<u64>(ARG_AUTH_TIMEOUT_SECONDS)
        .copied()
        .unwrap_or(10);

    Ok(Action::Server(Args {
        port,
        site_url,
        auth_url,
        auth_anon_key,
        auth_timeout_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn maps_matches_into_server_args() -> Result<()> {
        let matches = commands::new().try_get_matches_from(vec![
            "aied",
            "--port",
            "3000",
            "--site-url",
            "https://aied.tools",
            "--auth-url",
            "https://project.supabase.co",
            "--auth-anon-key",
            "anon-key",
        ])?;

        let Action::Server(args) = handler(&matches)?;

        assert_eq!(args.port, 3000);
        assert_eq!(args.site_url, "https://aied.tools");
        assert_eq!(args.auth_url, "https://project.supabase.co");
        assert_eq!(args.auth_anon_key.expose_secret(), "anon-key");
        Ok(())
    }
}
