//! OAuth2 token returned by the authorization code exchange

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Token filename in the gmail-inbox config directory
const TOKEN_FILE: &str = "token.json";

/// Opaque credentials obtained from the token endpoint
///
/// Mirrors the shape Google client libraries persist, so a token written by
/// another tool can be loaded and applied as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiry as Unix epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Token response body from Google
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
    id_token: Option<String>,
    scope: Option<String>,
}

/// Absolute expiry in epoch millis, saturating on absurd lifetimes
fn expiry_from(now_ms: i64, expires_in_secs: u64) -> i64 {
    i64::try_from(expires_in_secs)
        .ok()
        .and_then(|secs| secs.checked_mul(1000))
        .and_then(|ms| now_ms.checked_add(ms))
        .unwrap_or(i64::MAX)
}

impl Token {
    /// Tokens this close to expiry are treated as expired
    const EXPIRY_BUFFER_MS: i64 = 5 * 60 * 1000;

    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expiry_date: None,
            token_type: None,
            id_token: None,
            scope: None,
        }
    }

    /// Convert a token endpoint response received at `now_ms`
    pub(crate) fn from_response(response: TokenResponse, now_ms: i64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expiry_date: response.expires_in.map(|secs| expiry_from(now_ms, secs)),
            token_type: response.token_type,
            id_token: response.id_token,
            scope: response.scope,
        }
    }

    /// Whether the token is expired or about to expire.
    /// A token without an expiry date never expires.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp_millis())
    }

    fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expiry_date
            .is_some_and(|expiry| expiry <= now_ms.saturating_add(Self::EXPIRY_BUFFER_MS))
    }

    /// Load a stored token from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        config::load_json_file(path.as_ref())
    }

    /// Save the token to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        config::save_json_file(path.as_ref(), self)
    }

    /// Get the default token storage path (~/.config/gmail-inbox/token.json)
    ///
    /// Delete this file after changing the requested scopes.
    pub fn default_token_path() -> Option<PathBuf> {
        config::config_path(TOKEN_FILE)
    }
}
