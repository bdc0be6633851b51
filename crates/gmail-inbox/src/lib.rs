//! gmail-inbox - Gmail API authorization helpers
//!
//! This crate provides:
//! - Loading and validating OAuth client credentials files
//! - Building the authorization URL for read-only Gmail access
//! - Exchanging an authorization code for a token
//! - Attaching a token to an OAuth2 client
//!
//! All operations are synchronous. Each authorizer call rebuilds its client
//! from the credentials file on disk.

pub mod authorizer;
pub mod config;
pub mod gmail;

pub use authorizer::{
    GMAIL_READONLY_SCOPE, SCOPES, authorize_account, get_auth_url, get_oauth_client, get_token,
    get_token_with,
};
pub use config::{ClientCredentials, CredentialsError};
pub use gmail::{
    AccessType, AuthUrlOptions, CodeExchange, HttpTokenExchange, OAuth2Client, Token,
    TokenExchange,
};
