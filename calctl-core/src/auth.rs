//! Obtaining a usable credential: cached, or via the authorization-code flow.

use std::io::Write;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::app_config::AppConfig;
use crate::console::{Console, LineSource};
use crate::credential::{Credential, CredentialStore};
use crate::error::{CalctlError, CalctlResult};

pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/calendar.events",
    "https://www.googleapis.com/auth/calendar.readonly",
];

/// Successful response from the OAuth token endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// Google omits the refresh token on refresh; the previous one stays valid.
    pub fn into_credential(self, previous_refresh_token: &str, now: DateTime<Utc>) -> Credential {
        let refresh_token = match self.refresh_token {
            Some(token) if !token.is_empty() => token,
            _ => previous_refresh_token.to_string(),
        };

        Credential {
            access_token: self.access_token,
            token_type: self
                .token_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Bearer".to_string()),
            refresh_token,
            expiry: self
                .expires_in
                .filter(|secs| *secs > 0)
                .map(|secs| now + Duration::seconds(secs)),
        }
    }
}

/// The token endpoint of the OAuth provider.
#[allow(async_fn_in_trait)]
pub trait OAuthClient {
    async fn exchange_code(&self, code: &str) -> CalctlResult<TokenResponse>;

    async fn refresh(&self, refresh_token: &str) -> CalctlResult<TokenResponse>;
}

pub struct Authenticator<O> {
    app: AppConfig,
    store: CredentialStore,
    oauth: O,
    open_url: Option<Box<dyn Fn(&str)>>,
}

impl<O: OAuthClient> Authenticator<O> {
    pub fn new(app: AppConfig, store: CredentialStore, oauth: O) -> Self {
        Authenticator {
            app,
            store,
            oauth,
            open_url: None,
        }
    }

    /// Called with the consent URL after it has been printed, e.g. to open a browser.
    pub fn on_consent_url(mut self, open_url: impl Fn(&str) + 'static) -> Self {
        self.open_url = Some(Box::new(open_url));
        self
    }

    /// Load the cached credential, or run the interactive flow and cache the result.
    ///
    /// An expired cached credential is returned as is; [`TokenSource`] refreshes
    /// it on first use.
    pub async fn obtain<L: LineSource, W: Write>(
        self,
        console: &mut Console<L, W>,
    ) -> CalctlResult<TokenSource<O>> {
        let credential = match self.store.load() {
            Ok(credential) => credential,
            Err(CalctlError::CredentialNotFound(path)) => {
                debug!(%path, "no cached credential");
                self.authorize(console).await?
            }
            Err(e) => {
                warn!(error = %e, "cached credential unusable, authorizing again");
                self.authorize(console).await?
            }
        };

        Ok(TokenSource::new(credential, self.store, self.oauth))
    }

    async fn authorize<L: LineSource, W: Write>(
        &self,
        console: &mut Console<L, W>,
    ) -> CalctlResult<Credential> {
        let state = uuid::Uuid::new_v4().to_string();
        let auth_url = self.app.consent_url(SCOPES, &state)?;

        writeln!(
            console,
            "Go to the following link in your browser then type the authorization code: \n{auth_url}"
        )?;

        if let Some(open_url) = &self.open_url {
            open_url(&auth_url);
        }

        let input = console.prompt("Authorization code")?;
        let code = extract_code(&input);
        if code.is_empty() {
            return Err(CalctlError::Auth("No authorization code entered".into()));
        }

        let token = self.oauth.exchange_code(&code).await.map_err(|e| match e {
            CalctlError::Auth(msg) => {
                CalctlError::Auth(format!("Unable to retrieve token from web: {msg}"))
            }
            other => other,
        })?;

        let credential = token.into_credential("", Utc::now());
        self.store.save(&credential)?;

        info!(path = %self.store.path().display(), "authorization complete, credential cached");
        Ok(credential)
    }
}

/// Accepts either the bare code or the whole redirect URL copied from the browser.
fn extract_code(input: &str) -> String {
    Url::parse(input)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == "code")
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_else(|| input.to_string())
}

/// The authenticated handle: hands out access tokens, refreshing and re-caching
/// the credential when it has expired.
pub struct TokenSource<O> {
    credential: Mutex<Credential>,
    store: CredentialStore,
    oauth: O,
}

impl<O: OAuthClient> TokenSource<O> {
    pub fn new(credential: Credential, store: CredentialStore, oauth: O) -> Self {
        TokenSource {
            credential: Mutex::new(credential),
            store,
            oauth,
        }
    }

    pub fn credential(&self) -> Credential {
        self.lock().clone()
    }

    pub async fn access_token(&self) -> CalctlResult<String> {
        let current = self.credential();

        if !current.is_expired() {
            return Ok(current.access_token);
        }

        if !current.can_refresh() {
            return Err(CalctlError::Auth(format!(
                "Access token expired and no refresh token is cached; delete {} and authorize again",
                self.store.path().display()
            )));
        }

        debug!("access token expired, refreshing");

        let refreshed = self
            .oauth
            .refresh(&current.refresh_token)
            .await
            .map_err(|e| CalctlError::Auth(format!("Failed to refresh token: {e}")))?
            .into_credential(&current.refresh_token, Utc::now());

        self.store.save(&refreshed)?;

        let access_token = refreshed.access_token.clone();
        *self.lock() = refreshed;
        Ok(access_token)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Credential> {
        self.credential
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
