//! klv-quote
//!
//! Quote transforms for script source stored in spreadsheet cells.
//!
//! Two escaping conventions exist in the sheets and are kept as separate,
//! explicitly named operations:
//!
//! - [`decode_sentinel`]: TradeStation cell. `""""` is two quotes, `@` is one.
//! - [`decode_doubled`]: TradingView cell. `""""` is two quotes, `""` is one,
//!   and one wrapping quote is stripped from each end.
//!
//! HTML escaping ([`escape_html`], [`escape_html_markup`]) is display-only and
//! never feeds back into the decoded source that gets copied.

mod escape;
mod html;

pub use escape::{decode_doubled, decode_sentinel, encode_doubled, encode_sentinel, wrap_doubled};
pub use html::{escape_html, escape_html_markup};

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Raw text contains the `@` sentinel, which the sentinel convention
    /// cannot represent.
    #[error("raw text contains '@' at byte {offset}; the sentinel convention cannot encode it")]
    SentinelInRaw { offset: usize },

    #[error("unknown quote variant '{0}'. expected one of: sentinel | doubled")]
    UnknownVariant(String),
}

/// Which cell convention produced a piece of escaped source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteVariant {
    /// `@` sentinel + quadruple quotes (TradeStation cell).
    Sentinel,
    /// Doubled quotes + wrapper quotes (TradingView cell).
    Doubled,
}

impl QuoteVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteVariant::Sentinel => "sentinel",
            QuoteVariant::Doubled => "doubled",
        }
    }

    /// Escaped cell text -> raw source.
    pub fn decode(&self, escaped: &str) -> String {
        let raw = match self {
            QuoteVariant::Sentinel => decode_sentinel(escaped),
            QuoteVariant::Doubled => decode_doubled(escaped),
        };
        debug!(
            variant = self.as_str(),
            escaped_len = escaped.len(),
            raw_len = raw.len(),
            "decoded cell source"
        );
        raw
    }

    /// Raw source -> escaped cell text.
    ///
    /// The doubled variant emits the wrapped form, see [`wrap_doubled`].
    pub fn encode(&self, raw: &str) -> Result<String, QuoteError> {
        match self {
            QuoteVariant::Sentinel => encode_sentinel(raw),
            QuoteVariant::Doubled => Ok(wrap_doubled(raw)),
        }
    }

    /// HTML-safe text for the display block.
    ///
    /// The sentinel variant escapes quotes too; the doubled variant leaves
    /// them literal.
    pub fn escape_for_display(&self, raw: &str) -> String {
        match self {
            QuoteVariant::Sentinel => escape_html(raw),
            QuoteVariant::Doubled => escape_html_markup(raw),
        }
    }
}

impl FromStr for QuoteVariant {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sentinel" | "tradestation" | "a" => Ok(QuoteVariant::Sentinel),
            "doubled" | "tradingview" | "b" => Ok(QuoteVariant::Doubled),
            other => Err(QuoteError::UnknownVariant(other.to_string())),
        }
    }
}
