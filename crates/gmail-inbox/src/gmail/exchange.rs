//! Authorization code exchange
//!
//! The exchange sits behind a trait so the HTTP transport can be swapped
//! (tests, proxies). The default implementation uses synchronous HTTP
//! (ureq) to be executor-agnostic.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::OAuth2Client;
use super::token::{Token, TokenResponse};

/// Parameters of an authorization code grant
#[derive(Debug, Clone, Copy)]
pub struct CodeExchange<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub code: &'a str,
}

/// Trades an authorization code for a token
pub trait TokenExchange: Send + Sync {
    fn exchange(&self, request: &CodeExchange<'_>) -> Result<Token>;
}

/// Error body returned by the token endpoint on a rejected grant
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Token exchange over HTTP against an OAuth2 token endpoint
#[derive(Debug, Clone)]
pub struct HttpTokenExchange {
    token_url: String,
}

impl HttpTokenExchange {
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
        }
    }
}

impl Default for HttpTokenExchange {
    fn default() -> Self {
        Self::new(OAuth2Client::TOKEN_URL)
    }
}

impl TokenExchange for HttpTokenExchange {
    fn exchange(&self, request: &CodeExchange<'_>) -> Result<Token> {
        log::debug!("Exchanging authorization code at {}", self.token_url);

        let mut response = ureq::post(&self.token_url)
            .config()
            .http_status_as_error(false)
            .build()
            .send_form([
                ("client_id", request.client_id),
                ("client_secret", request.client_secret),
                ("code", request.code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", request.redirect_uri),
            ])
            .context("Failed to exchange authorization code")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            let detail = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(ErrorResponse {
                    error,
                    error_description: Some(description),
                }) => format!("{}: {}", error, description),
                Ok(ErrorResponse { error, .. }) => error,
                Err(_) => body,
            };
            anyhow::bail!(
                "Failed to exchange authorization code ({}): {}",
                status,
                detail
            );
        }

        let token: TokenResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse token response")?;

        Ok(Token::from_response(
            token,
            chrono::Utc::now().timestamp_millis(),
        ))
    }
}
