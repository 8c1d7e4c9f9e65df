//! Adapter for the hosted authentication provider.

mod error;
mod gotrue;
pub mod pkce;
mod provider;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use self::error::{AuthError, AuthErrorKind};
pub use self::gotrue::GoTrueClient;
pub use self::pkce::PkceVerifier;
pub use self::provider::AuthProvider;
pub use self::types::{
    Credentials, PasswordReset, Session, SessionTokens, SignUp, User, UserMetadata,
};
