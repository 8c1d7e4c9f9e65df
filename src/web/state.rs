//! Shared, immutable state handed to every handler.

use std::sync::Arc;
use url::Url;

use crate::auth::AuthProvider;

const CALLBACK_PATH: &str = "api/auth/callback";
const UPDATE_PASSWORD_PATH: &str = "api/auth/update-password";

/// Public origin of the site, used for the links the provider emails out.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    site_url: Url,
}

impl SiteConfig {
    /// # Errors
    /// Returns an error if `site_url` is not an absolute http(s) URL.
    pub fn new(site_url: &str) -> anyhow::Result<Self> {
        let mut parsed = Url::parse(site_url)?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            anyhow::bail!("site URL must be an absolute http(s) URL: {site_url}");
        }
        parsed.set_query(None);
        parsed.set_fragment(None);
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self { site_url: parsed })
    }

    #[must_use]
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// Email confirmation target: `<site>/api/auth/callback`.
    #[must_use]
    pub fn callback_url(&self) -> Url {
        self.join(CALLBACK_PATH)
    }

    /// Password recovery target: `<site>/api/auth/update-password`.
    #[must_use]
    pub fn update_password_url(&self) -> Url {
        self.join(UPDATE_PASSWORD_PATH)
    }

    /// Cookies are only marked `Secure` when the site is served over HTTPS.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.site_url.scheme() == "https"
    }

    fn join(&self, path: &str) -> Url {
        // Both paths are relative and valid, joining onto a http(s) base cannot fail
        self.site_url
            .join(path)
            .unwrap_or_else(|_| self.site_url.clone())
    }
}

pub struct AppState {
    provider: Arc<dyn AuthProvider>,
    site: SiteConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>, site: SiteConfig) -> Self {
        Self { provider, site }
    }

    #[must_use]
    pub fn provider(&self) -> &dyn AuthProvider {
        self.provider.as_ref()
    }

    #[must_use]
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }
}
