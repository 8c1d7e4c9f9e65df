//! # AI Ed Tools (web front-end)
//!
//! `aied` serves the public pages of the AI Ed Tools product: a marketing home
//! page, sign-in, sign-up, password reset and a placeholder dashboard.
//!
//! ## Hosted authentication
//!
//! Nothing here stores credentials. Password hashing, session tokens, email
//! confirmation and recovery links are owned by a hosted GoTrue-compatible
//! provider. The [`auth::AuthProvider`] trait is the only seam between the pages
//! and that provider; [`auth::GoTrueClient`] implements it over HTTP.
//!
//! ## Forms
//!
//! Every auth form runs through a [`forms::FormController`] which tracks a
//! four-state [`forms::FormStatus`] (`Idle`, `Loading`, `Success`, `Error`) and
//! emits toast notifications. Provider failures are logged and shown to the
//! user, never propagated as HTTP errors.
//!
//! ## Sessions
//!
//! The provider's session lives in `HttpOnly` cookies. Each request resolves it
//! once into a read-only [`web::session::SessionContext`] which is passed
//! explicitly to the page being rendered.

pub mod auth;
pub mod cli;
pub mod forms;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
