//! klv-pine
//!
//! Pine Script (v6) generation for TradingView.
//!
//! - [`gap_indicator`]: the gap label alone.
//! - [`key_levels_script`]: support/resistance lines per ticker, read from
//!   the sheet, followed by the same gap label.
//!
//! The gap block picks its reference the same way `klv-gap` does: today's
//! regular-session open once it exists, otherwise the last price.

mod gap;
mod levels;

pub use gap::{gap_indicator, GAP_REFERENCE_LINE};
pub use levels::{key_levels_script, parse_key_levels, parse_levels, KeyLevelsRow};

/// Presentation knobs shared by both scripts. Colors are Pine expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PineOptions {
    pub title: String,
    pub label_color: String,
    pub text_color: String,
    pub support_color: String,
    pub resistance_color: String,
}

impl Default for PineOptions {
    fn default() -> Self {
        Self {
            title: "Key Levels".to_string(),
            label_color: "color.blue".to_string(),
            text_color: "color.white".to_string(),
            support_color: "color.green".to_string(),
            resistance_color: "color.red".to_string(),
        }
    }
}

/// Quote `s` as a Pine string literal.
pub(crate) fn pine_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Pine float literal: always carries a decimal point.
pub(crate) fn pine_float(v: f64) -> String {
    let s = v.to_string();
    if s.contains('.') || s.contains('e') {
        s
    } else {
        format!("{s}.0")
    }
}

fn header(title: &str) -> String {
    format!(
        "//@version=6\nindicator({}, overlay=true)\n",
        pine_string(title)
    )
}
