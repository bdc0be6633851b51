//! Gmail OAuth2 integration
//!
//! This module provides:
//! - An OAuth2 client (authorization URL, code exchange, credentials)
//! - The token exchange seam and its HTTP implementation
//! - The token type returned by the exchange

mod auth;
mod exchange;
mod token;

pub use auth::{AccessType, AuthUrlOptions, OAuth2Client};
pub use exchange::{CodeExchange, HttpTokenExchange, TokenExchange};
pub use token::Token;
