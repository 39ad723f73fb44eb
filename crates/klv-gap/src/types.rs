use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::session::TradingSession;

/// Inputs for one gap evaluation tick.
///
/// Built fresh on every evaluation; nothing carries over between calls.
#[derive(Clone, Debug, PartialEq)]
pub struct GapInput {
    /// Previous regular-session close. Must be > 0.
    pub previous_close: f64,
    /// Today's regular-session opening print. `None` until the open prints.
    pub todays_open: Option<f64>,
    /// Latest trade price (premarket or intraday).
    pub current_price: f64,
    /// Evaluation instant (UTC); converted to venue time internally.
    pub now: DateTime<Utc>,
}

impl GapInput {
    pub fn new(
        previous_close: f64,
        todays_open: Option<f64>,
        current_price: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            previous_close,
            todays_open,
            current_price,
            now,
        }
    }
}

/// Which input supplied the reference price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    TodaysOpen,
    CurrentPrice,
}

/// Output of [`crate::evaluate`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GapResult {
    pub reference_price: f64,
    pub reference_source: ReferenceSource,
    /// `100 * (reference - previous_close) / previous_close`, unrounded.
    pub gap_percent: f64,
    /// Rounded for display: 1 decimal below 3% magnitude, integer otherwise.
    pub display_percent: f64,
    /// Number of decimals `display_percent` was rounded to (1 or 0).
    pub display_decimals: u8,
    pub session: TradingSession,
}

impl GapResult {
    /// Display string, e.g. `"2.4%"` or `"-6%"`.
    pub fn label(&self) -> String {
        format!(
            "{:.*}%",
            usize::from(self.display_decimals),
            self.display_percent
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GapError {
    /// Previous close is zero; the gap is undefined.
    #[error("previous close is zero: gap percent is undefined")]
    DivisionByZero,

    /// A price input was NaN, infinite, or negative.
    #[error("invalid {field}: price must be finite and non-negative")]
    InvalidPrice { field: &'static str },
}
