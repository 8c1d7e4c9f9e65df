//! `AuthProvider` over the GoTrue REST API (`/auth/v1/...`).
//!
//! Every request carries the project's anon key in the `apikey` header.
//! Requests on behalf of a user authenticate with the user's access token;
//! everything else uses the anon key as bearer.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{
    pkce, AuthError, AuthProvider, Credentials, PasswordReset, PkceVerifier, Session,
    SessionTokens, SignUp, User,
};
use crate::APP_USER_AGENT;

#[derive(Clone)]
pub struct GoTrueClient {
    client: Client,
    base_url: Url,
    anon_key: SecretString,
}

impl std::fmt::Debug for GoTrueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoTrueClient")
            .field("base_url", &self.base_url.as_str())
            .field("anon_key", &"***")
            .finish_non_exhaustive()
    }
}

impl GoTrueClient {
    /// Build a client for the provider at `base_url` (e.g. `https://project.supabase.co`).
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, anon_key: SecretString, timeout: Duration) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("auth provider URL cannot be a base: {base_url}");
        }
        // `Url::join` replaces the last path segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            anon_key,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(&format!("auth/v1/{path}"))
            .map_err(|e| AuthError::unknown(format!("invalid auth endpoint {path}: {e}")))
    }

    fn public(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(self.anon_key.expose_secret())
    }

    fn as_user(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        builder
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, AuthError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).unwrap_or_default();
        let err = AuthError::from_response(status, &body);

        debug!(%status, kind = %err.kind(), "auth provider rejected request");

        Err(err)
    }

    async fn session_from(response: Response) -> Result<Session, AuthError> {
        response
            .json::<Session>()
            .await
            .map_err(|e| AuthError::unknown(format!("invalid session response: {e}")))
    }
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });

        let response = Self::send(self.public(self.client.post(url)).json(&body)).await?;

        Self::session_from(response).await
    }

    #[instrument(skip_all, fields(email = %request.email))]
    async fn sign_up(&self, request: &SignUp) -> Result<(), AuthError> {
        let mut url = self.endpoint("signup")?;
        url.query_pairs_mut()
            .append_pair("redirect_to", request.email_redirect_to.as_str());

        let body = json!({
            "email": request.email,
            "password": request.password.expose_secret(),
            "data": { "full_name": request.full_name },
            "code_challenge": request.code_verifier.challenge(),
            "code_challenge_method": pkce::CHALLENGE_METHOD,
        });

        Self::send(self.public(self.client.post(url)).json(&body)).await?;

        Ok(())
    }

    #[instrument(skip_all, fields(email = %request.email))]
    async fn reset_password(&self, request: &PasswordReset) -> Result<(), AuthError> {
        let mut url = self.endpoint("recover")?;
        url.query_pairs_mut()
            .append_pair("redirect_to", request.redirect_to.as_str());

        let body = json!({
            "email": request.email,
            "code_challenge": request.code_verifier.challenge(),
            "code_challenge_method": pkce::CHALLENGE_METHOD,
        });

        Self::send(self.public(self.client.post(url)).json(&body)).await?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn get_session(&self, tokens: &SessionTokens) -> Option<Session> {
        let access_token = tokens
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())?;

        let url = match self.endpoint("user") {
            Ok(url) => url,
            Err(err) => {
                warn!("Failed to build user endpoint: {err}");
                return None;
            }
        };

        let response = match Self::send(self.as_user(self.client.get(url), access_token)).await {
            Ok(response) => response,
            Err(err) => {
                debug!(kind = %err.kind(), "session lookup rejected: {err}");
                return None;
            }
        };

        match response.json::<User>().await {
            Ok(user) => Some(Session::from_tokens(tokens, access_token.to_string(), user)),
            Err(err) => {
                warn!("Invalid user response from auth provider: {err}");
                None
            }
        }
    }

    #[instrument(skip_all)]
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "refresh_token");

        let body = json!({ "refresh_token": refresh_token });

        let response = Self::send(self.public(self.client.post(url)).json(&body)).await?;

        Self::session_from(response).await
    }

    #[instrument(skip_all)]
    async fn exchange_code(
        &self,
        code: &str,
        verifier: &PkceVerifier,
    ) -> Result<Session, AuthError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "pkce");

        let body = json!({
            "auth_code": code,
            "code_verifier": verifier.as_str(),
        });

        let response = Self::send(self.public(self.client.post(url)).json(&body)).await?;

        Self::session_from(response).await
    }

    #[instrument(skip_all, fields(user_id = %session.user.id))]
    async fn update_password(
        &self,
        session: &Session,
        password: &SecretString,
    ) -> Result<(), AuthError> {
        let url = self.endpoint("user")?;
        let body = json!({ "password": password.expose_secret() });

        Self::send(
            self.as_user(self.client.put(url), &session.access_token)
                .json(&body),
        )
        .await?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("logout")?;

        Self::send(self.as_user(self.client.post(url), access_token)).await?;

        Ok(())
    }

    async fn health(&self) -> Result<(), AuthError> {
        let url = self.endpoint("health")?;

        Self::send(self.public(self.client.get(url))).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn client(base: &str) -> Result<GoTrueClient> {
        GoTrueClient::new(base, SecretString::from("anon"), Duration::from_secs(1))
    }

    #[test]
    fn endpoint_is_joined_under_auth_v1() -> Result<()> {
        let client = client("https://project.supabase.co")?;
        assert_eq!(
            client.endpoint("token")?.as_str(),
            "https://project.supabase.co/auth/v1/token"
        );
        Ok(())
    }

    #[test]
    fn endpoint_keeps_base_path() -> Result<()> {
        let client = client("http://localhost:54321/proxy")?;
        assert_eq!(
            client.endpoint("signup")?.as_str(),
            "http://localhost:54321/proxy/auth/v1/signup"
        );
        Ok(())
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(client("not a url").is_err());
        assert!(client("mailto:team@aied.tools").is_err());
    }

    #[test]
    fn debug_hides_anon_key() -> Result<()> {
        let client = client("https://project.supabase.co")?;
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("anon\""));
        assert!(rendered.contains("***"));
        Ok(())
    }

    #[tokio::test]
    async fn get_session_without_cookie_is_none() -> Result<()> {
        let client = client("http://127.0.0.1:9")?;
        assert!(client.get_session(&SessionTokens::default()).await.is_none());
        Ok(())
    }
}
