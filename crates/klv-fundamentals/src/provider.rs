//! Provider boundary for fundamentals fetches.
//!
//! This module defines **only** the result type, the error type, the
//! provider trait, and the small helpers shared by the concrete providers.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Result type
// ---------------------------------------------------------------------------

/// The two consumed fields, kept as the provider's own text so nothing is
/// reformatted on the way to the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fundamentals {
    pub symbol: String,
    /// Short interest as a percent of float, e.g. `"0.71"`.
    pub short_percent_float: String,
    /// Institutional ownership percent, e.g. `"61.2"`.
    pub institutional_ownership: String,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Network or transport failure. Messages never carry the request URL,
    /// which holds the API key.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// An expected field was absent, null, or a provider "no value" marker.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid symbol: '{0}'")]
    InvalidSymbol(String),

    /// Client construction or other local setup failed.
    #[error("config error: {0}")]
    Config(String),
}

impl ProviderError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.without_url().to_string())
    }
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Upstream fundamentals provider contract.
///
/// Object-safe so callers can pick a provider at runtime and hold a
/// `Box<dyn FundamentalsProvider>`.
pub trait FundamentalsProvider: Send + Sync {
    /// Short identifier (e.g. `"fmp"`).
    fn name(&self) -> &'static str;

    /// One blocking request for `symbol`. No retries.
    fn fetch(&self, symbol: &str) -> Result<Fundamentals, ProviderError>;
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, ProviderError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Config(e.without_url().to_string()))
}

pub(crate) fn normalize_symbol(symbol: &str) -> Result<String, ProviderError> {
    let s = symbol.trim();
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return Err(ProviderError::InvalidSymbol(symbol.to_string()));
    }
    Ok(s.to_ascii_uppercase())
}

pub(crate) fn parse_body(body: &str) -> Result<Value, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Text of a JSON leaf, or `None` for absent / null / blank / "None" / "-".
pub(crate) fn field_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::Null => None,
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() || t.eq_ignore_ascii_case("none") || t == "-" {
                None
            } else {
                Some(t.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
