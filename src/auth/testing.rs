//! Recording provider double for unit tests.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use uuid::Uuid;

use super::{
    AuthError, AuthErrorKind, AuthProvider, Credentials, PasswordReset, PkceVerifier, Session,
    SessionTokens, SignUp, User, UserMetadata,
};

pub const ACCESS_TOKEN: &str = "access-token";
pub const REFRESH_TOKEN: &str = "refresh-token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        full_name: String,
        email_redirect_to: String,
    },
    ResetPassword {
        email: String,
        redirect_to: String,
    },
    GetSession {
        access_token: Option<String>,
    },
    RefreshSession {
        refresh_token: String,
    },
    ExchangeCode {
        code: String,
        verifier: String,
    },
    UpdatePassword {
        password: String,
    },
    SignOut {
        access_token: String,
    },
}

pub fn session() -> Session {
    Session {
        access_token: ACCESS_TOKEN.to_string(),
        token_type: "bearer".to_string(),
        expires_in: 3600,
        refresh_token: REFRESH_TOKEN.to_string(),
        user: User {
            id: Uuid::from_u128(0x8d0f_be3e_1c1f_4c07_9c8e_6a0b_8f6c_9f42),
            email: Some("ada@example.com".to_string()),
            user_metadata: UserMetadata {
                full_name: Some("Ada Lovelace".to_string()),
            },
        },
    }
}

#[derive(Debug, Default)]
pub struct MockProvider {
    calls: Mutex<Vec<Call>>,
    failure: Option<AuthError>,
    signed_in: bool,
    gate: Option<Arc<Semaphore>>,
}

impl MockProvider {
    /// Every operation succeeds; no session is present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mutating operation fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(AuthError::new(AuthErrorKind::CredentialsInvalid, message)),
            ..Self::default()
        }
    }

    /// `get_session` resolves to [`session`] when an access token is presented
    /// and `refresh_session` renews any refresh token.
    pub fn signed_in() -> Self {
        Self {
            signed_in: true,
            ..Self::default()
        }
    }

    /// Hold every mutating call until the returned semaphore gets permits.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let provider = Self {
            gate: Some(gate.clone()),
            ..Self::default()
        };
        (provider, gate)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until at least `count` calls were recorded.
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }

    async fn record(&self, call: Call) -> Result<(), AuthError> {
        self.calls.lock().unwrap().push(call);

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthProvider for MockProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.record(Call::SignIn {
            email: credentials.email.clone(),
            password: credentials.password.expose_secret().to_string(),
        })
        .await?;
        Ok(session())
    }

    async fn sign_up(&self, request: &SignUp) -> Result<(), AuthError> {
        self.record(Call::SignUp {
            email: request.email.clone(),
            password: request.password.expose_secret().to_string(),
            full_name: request.full_name.clone(),
            email_redirect_to: request.email_redirect_to.to_string(),
        })
        .await
    }

    async fn reset_password(&self, request: &PasswordReset) -> Result<(), AuthError> {
        self.record(Call::ResetPassword {
            email: request.email.clone(),
            redirect_to: request.redirect_to.to_string(),
        })
        .await
    }

    async fn get_session(&self, tokens: &SessionTokens) -> Option<Session> {
        self.calls.lock().unwrap().push(Call::GetSession {
            access_token: tokens.access_token.clone(),
        });
        (self.signed_in && tokens.access_token.is_some()).then(session)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.calls.lock().unwrap().push(Call::RefreshSession {
            refresh_token: refresh_token.to_string(),
        });
        if self.signed_in {
            Ok(session())
        } else {
            Err(AuthError::new(
                AuthErrorKind::CredentialsInvalid,
                "Invalid Refresh Token: Refresh Token Not Found",
            ))
        }
    }

    async fn exchange_code(
        &self,
        code: &str,
        verifier: &PkceVerifier,
    ) -> Result<Session, AuthError> {
        self.record(Call::ExchangeCode {
            code: code.to_string(),
            verifier: verifier.as_str().to_string(),
        })
        .await?;
        Ok(session())
    }

    async fn update_password(
        &self,
        _session: &Session,
        password: &SecretString,
    ) -> Result<(), AuthError> {
        self.record(Call::UpdatePassword {
            password: password.expose_secret().to_string(),
        })
        .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.record(Call::SignOut {
            access_token: access_token.to_string(),
        })
        .await
    }

    async fn health(&self) -> Result<(), AuthError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
