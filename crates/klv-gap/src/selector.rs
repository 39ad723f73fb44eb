//! Reference-price selection and gap arithmetic.
//!
//! Policy: `reference = todays_open` when the opening print exists, otherwise
//! `current_price`. Presence of the print is authoritative: the clock signal
//! ([`has_market_opened`]) is only logged when it disagrees, and a delayed
//! opening print keeps the reference on the current price.

use tracing::debug;

use crate::session::{has_market_opened, TradingSession};
use crate::types::{GapError, GapInput, GapResult, ReferenceSource};

/// Gaps with magnitude below this keep one decimal for display.
const ONE_DECIMAL_BELOW: f64 = 3.0;

/// Pick the price compared against the previous close.
pub fn select_reference(input: &GapInput) -> (f64, ReferenceSource) {
    match input.todays_open {
        Some(open) => (open, ReferenceSource::TodaysOpen),
        None => {
            if has_market_opened(input.now) {
                debug!(
                    now = %input.now,
                    "clock is past the open but no opening print yet; using current price"
                );
            }
            (input.current_price, ReferenceSource::CurrentPrice)
        }
    }
}

/// `100 * (reference - previous_close) / previous_close`.
pub fn gap_percent(reference: f64, previous_close: f64) -> Result<f64, GapError> {
    if previous_close == 0.0 {
        return Err(GapError::DivisionByZero);
    }
    Ok(100.0 * ((reference - previous_close) / previous_close))
}

/// Asymmetric display rounding: one decimal when `|gap| < 3` (strict),
/// nearest integer otherwise. Ties round half away from zero.
///
/// Returns `(rounded, decimals)`.
pub fn round_display(gap_percent: f64) -> (f64, u8) {
    let (rounded, decimals) = if gap_percent.abs() < ONE_DECIMAL_BELOW {
        ((gap_percent * 10.0).round() / 10.0, 1)
    } else {
        (gap_percent.round(), 0)
    };
    // -0.0 would render as "-0.0%"
    if rounded == 0.0 {
        (0.0, decimals)
    } else {
        (rounded, decimals)
    }
}

/// Evaluate one tick: validate, select the reference, compute and round.
pub fn evaluate(input: &GapInput) -> Result<GapResult, GapError> {
    validate(input)?;

    let (reference_price, reference_source) = select_reference(input);
    let gap = gap_percent(reference_price, input.previous_close)?;
    let (display_percent, display_decimals) = round_display(gap);
    let session = TradingSession::at(input.now);

    debug!(
        reference_price,
        ?reference_source,
        gap_percent = gap,
        %session,
        "gap evaluated"
    );

    Ok(GapResult {
        reference_price,
        reference_source,
        gap_percent: gap,
        display_percent,
        display_decimals,
        session,
    })
}

fn validate(input: &GapInput) -> Result<(), GapError> {
    if input.previous_close == 0.0 {
        return Err(GapError::DivisionByZero);
    }
    check_price("previous_close", input.previous_close)?;
    check_price("current_price", input.current_price)?;
    if let Some(open) = input.todays_open {
        check_price("todays_open", open)?;
    }
    Ok(())
}

fn check_price(field: &'static str, value: f64) -> Result<(), GapError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GapError::InvalidPrice { field })
    }
}
