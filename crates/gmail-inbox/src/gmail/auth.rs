//! Gmail OAuth2 client
//!
//! Holds the client registration (id, secret, redirect URI) and, once
//! authorized, the token to use for API calls.

use anyhow::{Context, Result};
use std::fmt;
use url::Url;

use super::exchange::{CodeExchange, HttpTokenExchange, TokenExchange};
use super::token::Token;
use crate::config::ClientCredentials;

/// Whether the authorization should yield a refresh token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessType {
    #[default]
    Online,
    Offline,
}

impl AccessType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessType::Online => "online",
            AccessType::Offline => "offline",
        }
    }
}

/// Options for building an authorization URL
#[derive(Debug, Clone, Default)]
pub struct AuthUrlOptions {
    pub access_type: AccessType,
    /// e.g. "consent" to force the consent screen
    pub prompt: Option<String>,
    pub scopes: Vec<String>,
}

/// OAuth2 client for Google APIs
pub struct OAuth2Client {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    credentials: Option<Token>,
    exchange: Box<dyn TokenExchange>,
}

impl OAuth2Client {
    /// Google OAuth2 endpoints
    pub const AUTH_URL: &'static str = "https://accounts.google.com/o/oauth2/v2/auth";
    pub const TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    /// Create a new client
    ///
    /// # Arguments
    /// * `client_id` - OAuth2 client ID from Google Cloud Console
    /// * `client_secret` - OAuth2 client secret from Google Cloud Console
    /// * `redirect_uri` - Where the provider sends the authorization code
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            credentials: None,
            exchange: Box::new(HttpTokenExchange::default()),
        }
    }

    /// Create a client from loaded credentials, redirecting to the first redirect URI
    pub fn from_credentials(credentials: &ClientCredentials) -> Self {
        Self::new(
            credentials.client_id(),
            credentials.client_secret(),
            credentials.redirect_uri(),
        )
    }

    /// Replace the code exchange implementation
    pub fn with_token_exchange(mut self, exchange: impl TokenExchange + 'static) -> Self {
        self.exchange = Box::new(exchange);
        self
    }

    /// Point the HTTP code exchange at a different token endpoint
    pub fn with_token_url(self, token_url: impl Into<String>) -> Self {
        self.with_token_exchange(HttpTokenExchange::new(token_url))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Build the URL the user visits to grant access
    pub fn generate_auth_url(&self, options: &AuthUrlOptions) -> Result<String> {
        let mut url = Url::parse(Self::AUTH_URL).context("Invalid authorization endpoint")?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("access_type", options.access_type.as_str());
            if let Some(prompt) = &options.prompt {
                query.append_pair("prompt", prompt);
            }
            if !options.scopes.is_empty() {
                query.append_pair("scope", &options.scopes.join(" "));
            }
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri);
        }

        log::debug!(
            "Generated authorization URL for client {} ({} scopes)",
            self.client_id,
            options.scopes.len()
        );
        Ok(url.into())
    }

    /// Exchange an authorization code for a token
    ///
    /// Errors from the exchange are returned unchanged.
    pub fn get_token(&self, code: &str) -> Result<Token> {
        let token = self.exchange.exchange(&CodeExchange {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            redirect_uri: &self.redirect_uri,
            code,
        })?;

        log::info!("Obtained token for client {}", self.client_id);
        Ok(token)
    }

    /// Use the given token for subsequent requests
    pub fn set_credentials(&mut self, token: Token) {
        self.credentials = Some(token);
    }

    pub fn credentials(&self) -> Option<&Token> {
        self.credentials.as_ref()
    }

    /// Bearer token for the Authorization header, if authorized
    pub fn access_token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|t| t.access_token.as_str())
    }
}

impl fmt::Debug for OAuth2Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Client")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("authorized", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}
