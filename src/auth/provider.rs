use async_trait::async_trait;
use secrecy::SecretString;

use super::{
    AuthError, Credentials, PasswordReset, PkceVerifier, Session, SessionTokens, SignUp,
};

/// Operations the pages need from the hosted auth provider.
///
/// Implementations must not panic on provider failures; every failure is
/// reported as an [`AuthError`] so the form controller can surface it.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Password sign-in. Returns the newly established session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Register an account. The provider emails a confirmation link pointing
    /// at `email_redirect_to`; no session is returned.
    async fn sign_up(&self, request: &SignUp) -> Result<(), AuthError>;

    /// Send password recovery instructions.
    async fn reset_password(&self, request: &PasswordReset) -> Result<(), AuthError>;

    /// Resolve the session carried by the browser's cookies. `None` when the
    /// cookies are missing, expired or rejected.
    async fn get_session(&self, tokens: &SessionTokens) -> Option<Session>;

    /// Renew an expired session with its refresh token. The provider rotates
    /// the refresh token, so the returned session replaces both cookies.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError>;

    /// Trade the one-time code of a confirmation or recovery link for a session.
    async fn exchange_code(&self, code: &str, verifier: &PkceVerifier)
        -> Result<Session, AuthError>;

    async fn update_password(
        &self,
        session: &Session,
        password: &SecretString,
    ) -> Result<(), AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Reachability probe used by `/health`.
    async fn health(&self) -> Result<(), AuthError>;
}
