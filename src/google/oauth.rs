//! Token endpoint client for the authorization-code and refresh grants.

use calctl_core::app_config::AppConfig;
use calctl_core::auth::{OAuthClient, TokenResponse};
use calctl_core::{CalctlError, CalctlResult};

pub struct GoogleOAuth {
    http: reqwest::Client,
    token_uri: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuth {
    pub fn new(app: &AppConfig) -> Self {
        GoogleOAuth {
            http: reqwest::Client::new(),
            token_uri: app.token_uri.clone(),
            client_id: app.client_id.clone(),
            client_secret: app.client_secret.clone(),
            redirect_uri: app.redirect_uri().to_string(),
        }
    }

    async fn request_token(&self, grant: &[(&str, &str)]) -> CalctlResult<TokenResponse> {
        let mut form = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        form.extend_from_slice(grant);

        let response = self
            .http
            .post(&self.token_uri)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                CalctlError::Auth(format!("Token request to {} failed: {e}", self.token_uri))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CalctlError::Auth(format!("HTTP {status}: {error_text}")));
        }

        response
            .json()
            .await
            .map_err(|e| CalctlError::Auth(format!("Failed to parse token response: {e}")))
    }
}

impl OAuthClient for GoogleOAuth {
    async fn exchange_code(&self, code: &str) -> CalctlResult<TokenResponse> {
        self.request_token(&[
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> CalctlResult<TokenResponse> {
        self.request_token(&[
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .await
    }
}
