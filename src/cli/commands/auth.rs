use clap::{Arg, Command};

pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_AUTH_ANON_KEY: &str = "auth-anon-key";
pub const ARG_AUTH_TIMEOUT_SECONDS: &str = "auth-timeout-seconds";

/// Hosted auth provider connection.
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long(ARG_AUTH_URL)
                .help("Auth provider base URL, example: https://<project>.supabase.co")
                .env("AIED_AUTH_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_ANON_KEY)
                .long(ARG_AUTH_ANON_KEY)
                .help("Public (anon) API key sent to the auth provider")
                .env("AIED_AUTH_ANON_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_TIMEOUT_SECONDS)
                .long(ARG_AUTH_TIMEOUT_SECONDS)
                .help("Timeout for each auth provider request in seconds")
                .env("AIED_AUTH_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
