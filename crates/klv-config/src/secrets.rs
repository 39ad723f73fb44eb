//! Runtime API-key resolution.
//!
//! Config stores only env var NAMES (`providers.fmp.api_key_env`). Keys are
//! read once per invocation into [`ResolvedSecrets`] and passed to provider
//! constructors. `Debug` redacts values; errors name the variable, never the
//! value.

use anyhow::{bail, Result};

use crate::app::AppConfig;

#[derive(Clone)]
pub struct ResolvedSecrets {
    pub fmp_api_key: Option<String>,
    pub alpha_vantage_api_key: Option<String>,
    fmp_var: String,
    alpha_vantage_var: String,
}

impl std::fmt::Debug for ResolvedSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecrets")
            .field("fmp_api_key", &self.fmp_api_key.as_ref().map(|_| "<REDACTED>"))
            .field(
                "alpha_vantage_api_key",
                &self.alpha_vantage_api_key.as_ref().map(|_| "<REDACTED>"),
            )
            .field("fmp_var", &self.fmp_var)
            .field("alpha_vantage_var", &self.alpha_vantage_var)
            .finish()
    }
}

impl ResolvedSecrets {
    pub fn require_fmp_api_key(&self) -> Result<&str> {
        require(self.fmp_api_key.as_deref(), &self.fmp_var, "FMP api_key")
    }

    pub fn require_alpha_vantage_api_key(&self) -> Result<&str> {
        require(
            self.alpha_vantage_api_key.as_deref(),
            &self.alpha_vantage_var,
            "Alpha Vantage api_key",
        )
    }
}

fn require<'a>(value: Option<&'a str>, var: &str, what: &str) -> Result<&'a str> {
    match value {
        Some(v) => Ok(v),
        None => bail!("SECRETS_MISSING: required env var '{var}' ({what}) is not set or empty"),
    }
}

/// Resolve keys from the process environment.
pub fn resolve_secrets(cfg: &AppConfig) -> ResolvedSecrets {
    resolve_secrets_with(cfg, |name| std::env::var(name).ok())
}

/// Resolve keys through `lookup`. Blank values count as unset.
pub fn resolve_secrets_with<F>(cfg: &AppConfig, lookup: F) -> ResolvedSecrets
where
    F: Fn(&str) -> Option<String>,
{
    let fetch = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let fmp_var = cfg.providers.fmp.api_key_env.trim().to_string();
    let alpha_vantage_var = cfg.providers.alpha_vantage.api_key_env.trim().to_string();
    ResolvedSecrets {
        fmp_api_key: fetch(&fmp_var),
        alpha_vantage_api_key: fetch(&alpha_vantage_var),
        fmp_var,
        alpha_vantage_var,
    }
}
