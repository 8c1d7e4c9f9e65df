//! Request payloads and provider-issued session types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

use super::pkce::PkceVerifier;

/// Profile metadata attached to a user at sign-up.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl User {
    /// Name shown in the user menu: full name, then email, then the id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.user_metadata
            .full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .map_or_else(|| self.id.to_string(), ToString::to_string)
    }
}

/// Session issued by the provider. Only ever read locally.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Rebuild a session from cookie tokens and the user the provider returned for them.
    #[must_use]
    pub fn from_tokens(tokens: &SessionTokens, access_token: String, user: User) -> Self {
        Self {
            access_token,
            token_type: default_token_type(),
            expires_in: 0,
            refresh_token: tokens.refresh_token.clone().unwrap_or_default(),
            user,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &"***")
            .field("user", &self.user)
            .finish()
    }
}

/// Tokens carried by the browser's cookies.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Password sign-in payload.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Sign-up payload; `full_name` is stored as user metadata by the provider.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: SecretString,
    pub full_name: String,
    pub email_redirect_to: Url,
    pub code_verifier: PkceVerifier,
}

/// Password recovery payload.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub redirect_to: Url,
    pub code_verifier: PkceVerifier,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn session_deserializes_from_token_response() -> Result<()> {
        let value = json!({
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "rt",
            "user": {
                "id": "8d0fbe3e-1c1f-4c07-9c8e-6a0b8f6c9f42",
                "email": "ada@example.com",
                "user_metadata": { "full_name": "Ada Lovelace" },
                "aud": "authenticated"
            }
        });
        let session: Session = serde_json::from_value(value)?;
        assert_eq!(session.expires_in, 3600);
        assert_eq!(session.user.display_name(), "Ada Lovelace");
        Ok(())
    }

    #[test]
    fn display_name_falls_back_to_email() -> Result<()> {
        let user: User = serde_json::from_value(json!({
            "id": "8d0fbe3e-1c1f-4c07-9c8e-6a0b8f6c9f42",
            "email": "ada@example.com",
            "user_metadata": {}
        }))?;
        assert_eq!(user.display_name(), "ada@example.com");
        Ok(())
    }

    #[test]
    fn debug_output_hides_tokens() {
        let tokens = SessionTokens {
            access_token: Some("secret-access".to_string()),
            refresh_token: None,
        };
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(rendered.contains("***"));
    }
}
