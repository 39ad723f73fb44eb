//! klv-fundamentals
//!
//! Fundamentals fetch for the key-levels sheet: short interest as a percent
//! of float and institutional ownership, keyed by ticker.
//!
//! This crate owns the provider abstraction and the two concrete providers.
//! It does **not** write to sheets; callers take the two-cell
//! [`FundamentalsRow`] and place it where they like.
//!
//! Every invocation makes exactly one blocking HTTP call. Failures never
//! escape [`fundamentals_row`]: a missing field becomes `["N/A","N/A"]` and
//! anything else becomes `["Error", message]`.

pub mod alpha_vantage;
pub mod fmp;
pub mod provider;

pub use alpha_vantage::AlphaVantageProvider;
pub use fmp::FmpProvider;
pub use provider::{Fundamentals, FundamentalsProvider, ProviderError};

use tracing::{debug, warn};

/// Two cells written horizontally next to the ticker.
pub type FundamentalsRow = [String; 2];

pub const NOT_AVAILABLE: &str = "N/A";
pub const ERROR_MARKER: &str = "Error";

pub fn not_available_row() -> FundamentalsRow {
    [NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()]
}

pub fn error_row(message: impl Into<String>) -> FundamentalsRow {
    [ERROR_MARKER.to_string(), message.into()]
}

/// Fetch once and flatten the outcome into a sheet row.
///
/// | Outcome                        | Row                               |
/// |--------------------------------|-----------------------------------|
/// | both fields present            | `[short_float, inst_ownership]`   |
/// | [`ProviderError::MissingField`] | `["N/A", "N/A"]`                  |
/// | any other error                | `["Error", <message>]`            |
pub fn fundamentals_row<P>(provider: &P, symbol: &str) -> FundamentalsRow
where
    P: FundamentalsProvider + ?Sized,
{
    match provider.fetch(symbol) {
        Ok(f) => {
            debug!(provider = provider.name(), symbol, "fundamentals fetched");
            [f.short_percent_float, f.institutional_ownership]
        }
        Err(ProviderError::MissingField(field)) => {
            debug!(provider = provider.name(), symbol, field, "fundamentals field absent");
            not_available_row()
        }
        Err(err) => {
            warn!(provider = provider.name(), symbol, error = %err, "fundamentals fetch failed");
            error_row(err.to_string())
        }
    }
}
