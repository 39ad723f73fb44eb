//! Trading session partition for US equities.
//!
//! Deterministic, pure logic. No IO, no wall-clock.
//!
//! A calendar day in venue time (`America/New_York`, DST-aware) is split as:
//!
//! | Session      | Venue time                |
//! |--------------|---------------------------|
//! | `Premarket`  | 04:00:00 – 09:29:59       |
//! | `Regular`    | 09:30:00 – 16:00:00       |
//! | `AfterHours` | 16:00:01 – 03:59:59       |
//!
//! Both regular bounds are closed: 09:30:00 and 16:00:00 are `Regular`.
//! Sub-second precision is truncated before classification.
//!
//! The session is a display label. It never chooses the reference price;
//! see [`crate::select_reference`].

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Venue timezone for every session computation.
pub const VENUE_TZ: Tz = chrono_tz::America::New_York;

/// Regular session open as minutes since venue midnight (09:30).
pub const MARKET_OPEN_MINUTES: u32 = 9 * 60 + 30;

const PREMARKET_START_SECS: u32 = 4 * 3600; //  04:00:00
const REGULAR_START_SECS: u32 = MARKET_OPEN_MINUTES * 60; //  09:30:00
const REGULAR_END_SECS: u32 = 16 * 3600; //  16:00:00 (inclusive)

// ---------------------------------------------------------------------------
// TradingSession
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TradingSession {
    #[serde(rename = "PREMARKET")]
    Premarket,
    #[serde(rename = "REGULAR")]
    Regular,
    /// After the regular close, including the overnight hours before 04:00.
    #[serde(rename = "AFTERHOURS")]
    AfterHours,
}

impl TradingSession {
    /// Classify `now` by its venue-local time of day.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::from_secs_of_day(venue_secs_of_day(now))
    }

    fn from_secs_of_day(secs: u32) -> Self {
        if (REGULAR_START_SECS..=REGULAR_END_SECS).contains(&secs) {
            TradingSession::Regular
        } else if (PREMARKET_START_SECS..REGULAR_START_SECS).contains(&secs) {
            TradingSession::Premarket
        } else {
            TradingSession::AfterHours
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradingSession::Premarket => "PREMARKET",
            TradingSession::Regular => "REGULAR",
            TradingSession::AfterHours => "AFTERHOURS",
        }
    }
}

impl std::fmt::Display for TradingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary clock signal: `true` once venue time is at or past 09:30.
///
/// Advisory only. Presence of today's open price always wins over this.
pub fn has_market_opened(now: DateTime<Utc>) -> bool {
    venue_secs_of_day(now) / 60 >= MARKET_OPEN_MINUTES
}

fn venue_secs_of_day(now: DateTime<Utc>) -> u32 {
    now.with_timezone(&VENUE_TZ).num_seconds_from_midnight()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
