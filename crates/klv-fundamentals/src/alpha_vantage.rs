//! Alpha Vantage provider (`/query?function=OVERVIEW`).
//!
//! Alpha Vantage answers rate limits and unknown symbols with HTTP 200 and a
//! body that lacks the overview fields, so those surface as
//! [`ProviderError::MissingField`].

use std::time::Duration;

use tracing::debug;

use crate::provider::{
    build_client, field_text, normalize_symbol, parse_body, Fundamentals, FundamentalsProvider,
    ProviderError,
};

pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

#[derive(Clone)]
pub struct AlphaVantageProvider {
    api_key: String,
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        Self::new_with_base_url(api_key, ALPHA_VANTAGE_BASE_URL.to_string(), timeout)
    }

    pub fn new_with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key,
            http: build_client(timeout)?,
            base_url,
        })
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for AlphaVantageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageProvider")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FundamentalsProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    fn fetch(&self, symbol: &str) -> Result<Fundamentals, ProviderError> {
        let sym = normalize_symbol(symbol)?;

        let resp = self
            .http
            .get(self.query_url())
            .query(&[
                ("function", "OVERVIEW"),
                ("symbol", sym.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .map_err(ProviderError::transport)?;
        let status = resp.status();
        let body = resp.text().map_err(ProviderError::transport)?;

        let json = parse_body(&body)?;
        if let Some(note) = json.get("Note").or_else(|| json.get("Information")) {
            debug!(provider = "alpha_vantage", symbol = %sym, note = %note, "provider notice");
        }
        debug!(
            provider = "alpha_vantage",
            symbol = %sym,
            status = status.as_u16(),
            "response received"
        );

        let short_percent_float = field_text(json.get("ShortPercentFloat"))
            .ok_or(ProviderError::MissingField("ShortPercentFloat"))?;
        let institutional_ownership = field_text(json.get("PercentInstitutions"))
            .ok_or(ProviderError::MissingField("PercentInstitutions"))?;

        Ok(Fundamentals {
            symbol: sym,
            short_percent_float,
            institutional_ownership,
        })
    }
}
