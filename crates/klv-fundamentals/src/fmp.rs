//! Financial Modeling Prep provider (`/api/v4/company-outlook`).

use std::time::Duration;

use tracing::debug;

use crate::provider::{
    build_client, field_text, normalize_symbol, parse_body, Fundamentals, FundamentalsProvider,
    ProviderError,
};

pub const FMP_BASE_URL: &str = "https://financialmodelingprep.com";

/// API key is supplied by the caller (resolved from env); never logged.
#[derive(Clone)]
pub struct FmpProvider {
    api_key: String,
    http: reqwest::blocking::Client,
    base_url: String,
}

impl FmpProvider {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        Self::new_with_base_url(api_key, FMP_BASE_URL.to_string(), timeout)
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

    fn company_outlook_url(&self) -> String {
        format!("{}/api/v4/company-outlook", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for FmpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmpProvider")
            .field("api_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FundamentalsProvider for FmpProvider {
    fn name(&self) -> &'static str {
        "fmp"
    }

    fn fetch(&self, symbol: &str) -> Result<Fundamentals, ProviderError> {
        let sym = normalize_symbol(symbol)?;

        // Error statuses still carry a JSON body; it is inspected like any other.
        let resp = self
            .http
            .get(self.company_outlook_url())
            .query(&[("symbol", sym.as_str()), ("apikey", self.api_key.as_str())])
            .send()
            .map_err(ProviderError::transport)?;
        let status = resp.status();
        let body = resp.text().map_err(ProviderError::transport)?;
        debug!(provider = "fmp", symbol = %sym, status = status.as_u16(), "response received");

        let json = parse_body(&body)?;
        let metrics = json
            .get("metrics")
            .filter(|m| m.is_object())
            .ok_or(ProviderError::MissingField("metrics"))?;

        let short_percent_float = field_text(metrics.get("shortPercentageOfFloat"))
            .ok_or(ProviderError::MissingField("metrics.shortPercentageOfFloat"))?;
        let institutional_ownership = field_text(metrics.get("institutionalOwnershipPercentage"))
            .ok_or(ProviderError::MissingField(
                "metrics.institutionalOwnershipPercentage",
            ))?;

        Ok(Fundamentals {
            symbol: sym,
            short_percent_float,
            institutional_ownership,
        })
    }
}
