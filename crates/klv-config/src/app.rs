//! Typed view over the merged config JSON.
//!
//! Every field has a default matching the workbook layout the scripts were
//! written against, so an empty config is a working config.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub sheets: SheetsConfig,
    pub transfer: TransferConfig,
    pub providers: ProvidersConfig,
    pub http: HttpConfig,
    pub pine: PineConfig,
}

/// Where the escaped script sources live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub coding_sheet: String,
    /// Sentinel-escaped (TradeStation) source cell.
    pub tradestation_cell: String,
    /// Doubled-quote (TradingView) source cell.
    pub tradingview_cell: String,
    /// Ticker | supports | resistances block for the key-levels script.
    pub levels_range: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            coding_sheet: "CodingSheet".to_string(),
            tradestation_cell: "AI2".to_string(),
            tradingview_cell: "AJ2".to_string(),
            levels_range: "B2:D11".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    pub source_sheet: String,
    pub source_range: String,
    pub dest_sheet: String,
    pub dest_column: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            source_sheet: "CodingSheet".to_string(),
            source_range: "B2:W11".to_string(),
            dest_sheet: "Game Plan 2".to_string(),
            dest_column: "B".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    /// NAME of the env var holding the key. Never the key itself.
    pub api_key_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub fmp: ProviderConfig,
    pub alpha_vantage: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            fmp: ProviderConfig {
                base_url: "https://financialmodelingprep.com".to_string(),
                api_key_env: "FMP_API_KEY".to_string(),
            },
            alpha_vantage: ProviderConfig {
                base_url: "https://www.alphavantage.co".to_string(),
                api_key_env: "ALPHAVANTAGE_API_KEY".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PineConfig {
    pub title: String,
    pub label_color: String,
}

impl Default for PineConfig {
    fn default() -> Self {
        Self {
            title: "Key Levels".to_string(),
            label_color: "color.blue".to_string(),
        }
    }
}

impl AppConfig {
    /// Build from merged config JSON. Missing keys take defaults; present keys
    /// must have the right type.
    pub fn from_json(config_json: &Value) -> Result<Self> {
        let cfg: AppConfig = serde_json::from_value(config_json.clone())
            .context("CONFIG_INVALID: config does not match the expected shape")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            bail!("CONFIG_INVALID: http.timeout_secs must be > 0");
        }
        let providers = [
            ("fmp", &self.providers.fmp),
            ("alpha_vantage", &self.providers.alpha_vantage),
        ];
        for (name, p) in providers {
            if p.api_key_env.trim().is_empty() {
                bail!("CONFIG_INVALID: providers.{name}.api_key_env must not be empty");
            }
            if !(p.base_url.starts_with("http://") || p.base_url.starts_with("https://")) {
                bail!("CONFIG_INVALID: providers.{name}.base_url must be an http(s) URL");
            }
        }
        Ok(())
    }
}
