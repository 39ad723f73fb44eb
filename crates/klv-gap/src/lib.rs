//! klv-gap
//!
//! Gap-percentage reference-price selection for the key-levels workflow.
//!
//! Pure deterministic logic. No IO, no wall-clock reads: callers pass `now`.
//! The only ambient input is the fixed venue timezone (US Eastern).
//!
//! The reference price is chosen by presence of today's opening print, never
//! by the clock. The session label is derived from `now` for display only.

mod selector;
mod session;
mod types;

pub use selector::{evaluate, gap_percent, round_display, select_reference};
pub use session::{has_market_opened, TradingSession, MARKET_OPEN_MINUTES, VENUE_TZ};
pub use types::*;
