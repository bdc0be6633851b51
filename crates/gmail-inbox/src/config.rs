//! Client credentials loading
//!
//! Reads the OAuth client credentials file downloaded from Google Cloud
//! Console. The file holds one top-level key (`installed` for desktop apps,
//! `web` for web apps) whose value carries the client id, secret and
//! redirect URIs. Only the first key is considered.
//!
//! Every failure is logged with the `Gmail-inbox:` prefix before it is
//! returned, so callers that only want the old lenient behaviour can use
//! [`ClientCredentials::try_load`] and still get the diagnostics.

use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Credentials filename in the gmail-inbox config directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// Origin label used for credentials parsed from an in-memory string
const INLINE_ORIGIN: &str = "<inline json>";

/// Error loading or validating a credentials file
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Unable to find or read credentials json file {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse credentials json file {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Credentials json file {origin} contains no data, expected object with credentials")]
    Empty { origin: String },

    #[error(
        "Credentials in {origin} do not contain required attributes client_id, client_secret \
         and at least one redirect_uris item (missing: {})",
        .missing.join(", ")
    )]
    MissingFields {
        origin: String,
        missing: Vec<&'static str>,
    },
}

/// OAuth client credentials for Gmail API access
///
/// Only constructed through validation: `client_id` and `client_secret` are
/// non-empty and `redirect_uris` has a non-empty first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
    redirect_uris: Vec<String>,
}

/// Shape of the section under the first top-level key
#[derive(Deserialize)]
struct RawCredentials {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uris: Option<Vec<String>>,
}

impl ClientCredentials {
    /// Load and validate credentials from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        std::fs::read_to_string(path)
            .map_err(|source| CredentialsError::Read {
                origin: origin.clone(),
                source,
            })
            .and_then(|content| Self::parse(&origin, &content))
            .inspect_err(log_failure)
    }

    /// Load credentials, logging and discarding any failure
    pub fn try_load(path: impl AsRef<Path>) -> Option<Self> {
        Self::load(path).ok()
    }

    /// Parse and validate credentials from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CredentialsError> {
        Self::parse(INLINE_ORIGIN, json).inspect_err(log_failure)
    }

    /// Get the default credentials file path (~/.config/gmail-inbox/credentials.json)
    pub fn default_credentials_path() -> Option<PathBuf> {
        config::config_path(CREDENTIALS_FILE)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uris(&self) -> &[String] {
        &self.redirect_uris
    }

    /// The redirect target used for the authorization flow (first redirect URI)
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uris[0]
    }

    fn parse(origin: &str, json: &str) -> Result<Self, CredentialsError> {
        let document: Value =
            serde_json::from_str(json).map_err(|source| CredentialsError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        // Requires serde_json's preserve_order so "first" means document order
        let section = match document {
            Value::Object(map) => map.into_iter().next().map(|(_, value)| value),
            _ => None,
        }
        .ok_or_else(|| CredentialsError::Empty {
            origin: origin.to_string(),
        })?;

        if !section.is_object() {
            return Err(CredentialsError::MissingFields {
                origin: origin.to_string(),
                missing: vec!["client_id", "client_secret", "redirect_uris"],
            });
        }

        let raw: RawCredentials =
            serde_json::from_value(section).map_err(|source| CredentialsError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        Self::validate(origin, raw)
    }

    fn validate(origin: &str, raw: RawCredentials) -> Result<Self, CredentialsError> {
        let client_id = raw.client_id.filter(|s| !s.is_empty());
        let client_secret = raw.client_secret.filter(|s| !s.is_empty());
        let redirect_uris = raw.redirect_uris.unwrap_or_default();

        let mut missing = Vec::new();
        if client_id.is_none() {
            missing.push("client_id");
        }
        if client_secret.is_none() {
            missing.push("client_secret");
        }
        match redirect_uris.first() {
            None => missing.push("redirect_uris"),
            Some(first) if first.is_empty() => missing.push("redirect_uris[0]"),
            Some(_) => {}
        }

        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) if missing.is_empty() => Ok(Self {
                client_id,
                client_secret,
                redirect_uris,
            }),
            _ => Err(CredentialsError::MissingFields {
                origin: origin.to_string(),
                missing,
            }),
        }
    }
}

fn log_failure(err: &CredentialsError) {
    warn!("Gmail-inbox: {}", err);
}
