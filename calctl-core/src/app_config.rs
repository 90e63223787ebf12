//! OAuth client configuration (the `credentials.json` downloaded from the
//! Google Cloud console).
//!
//! Desktop clients nest the fields under `installed`, web clients under `web`.

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::{CalctlError, CalctlResult};

static DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
static DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
static DEFAULT_REDIRECT_URI: &str = "http://localhost";

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Deserialize)]
struct AppConfigFile {
    installed: Option<AppConfig>,
    web: Option<AppConfig>,
}

impl AppConfig {
    pub fn load(path: &Path) -> CalctlResult<Self> {
        if !path.exists() {
            return Err(CalctlError::Config(format!(
                "OAuth client file not found at {}.\n\n\
                Download it from https://console.cloud.google.com/apis/credentials \
                (OAuth client ID, type \"Desktop app\").",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalctlError::Config(format!("Unable to read {}: {e}", path.display()))
        })?;

        Self::from_json(&contents)
            .map_err(|e| CalctlError::Config(format!("{} in {}", e, path.display())))
    }

    pub fn from_json(contents: &str) -> CalctlResult<Self> {
        let file: AppConfigFile = serde_json::from_str(contents)
            .map_err(|e| CalctlError::Config(format!("Unable to parse client secret: {e}")))?;

        let config = file.installed.or(file.web).ok_or_else(|| {
            CalctlError::Config(
                "Client secret has neither an \"installed\" nor a \"web\" section".into(),
            )
        })?;

        if config.client_id.is_empty() {
            return Err(CalctlError::Config("Client secret has an empty client_id".into()));
        }

        Ok(config)
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_REDIRECT_URI)
    }

    /// URL the operator opens to grant access. Requests offline access so the
    /// token endpoint also returns a refresh token.
    pub fn consent_url(&self, scopes: &[&str], state: &str) -> CalctlResult<String> {
        let scope = scopes.join(" ");
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("state", state),
            ],
        )
        .map_err(|e| CalctlError::Config(format!("Invalid auth_uri {}: {e}", self.auth_uri)))?;

        Ok(url.to_string())
    }
}
