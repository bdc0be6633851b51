//! Credentials-file driven authorization
//!
//! Each operation loads the client credentials from the given path, builds
//! a fresh [`OAuth2Client`] and delegates to it. Nothing is cached and no
//! token is persisted here; see [`Token::save`] for that.

use anyhow::Result;
use std::path::Path;

use crate::config::ClientCredentials;
use crate::gmail::{AccessType, AuthUrlOptions, HttpTokenExchange, OAuth2Client, Token, TokenExchange};

/// Read-only access to the Gmail inbox
pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Scopes requested during authorization.
/// If modifying these scopes, delete the stored token.
pub const SCOPES: &[&str] = &[GMAIL_READONLY_SCOPE];

/// Build an OAuth2 client from a credentials file
pub fn get_oauth_client(credentials_path: impl AsRef<Path>) -> Result<OAuth2Client> {
    let credentials = ClientCredentials::load(credentials_path)?;
    Ok(OAuth2Client::from_credentials(&credentials))
}

/// Build the authorization URL: offline access, forced consent, read-only Gmail scope
pub fn get_auth_url(credentials_path: impl AsRef<Path>) -> Result<String> {
    let client = get_oauth_client(credentials_path)?;
    client.generate_auth_url(&AuthUrlOptions {
        access_type: AccessType::Offline,
        prompt: Some("consent".to_string()),
        scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
    })
}

/// Exchange an authorization code for a token at Google's token endpoint
pub fn get_token(credentials_path: impl AsRef<Path>, code: &str) -> Result<Token> {
    get_token_with(credentials_path, code, HttpTokenExchange::default())
}

/// Exchange an authorization code for a token using the given exchange
///
/// The exchange's error is returned as-is.
pub fn get_token_with(
    credentials_path: impl AsRef<Path>,
    code: &str,
    exchange: impl TokenExchange + 'static,
) -> Result<Token> {
    get_oauth_client(credentials_path)?
        .with_token_exchange(exchange)
        .get_token(code)
}

/// Build a client and, if a token is given, apply it as the client's credentials
pub fn authorize_account(
    credentials_path: impl AsRef<Path>,
    token: Option<Token>,
) -> Result<OAuth2Client> {
    let mut client = get_oauth_client(credentials_path)?;

    if let Some(token) = token {
        client.set_credentials(token);
    }

    Ok(client)
}
