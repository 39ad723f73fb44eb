//! Session labelling at the regular-session boundaries.
//!
//! All instants are built in venue time (America/New_York) and converted to
//! UTC, so the same assertions hold on EST and EDT dates.
//!
//!   2024-01-08 Mon  EST (UTC-5)
//!   2024-07-08 Mon  EDT (UTC-4)

use chrono::{DateTime, TimeZone, Utc};
use klv_gap::*;

fn et(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    VENUE_TZ
        .with_ymd_and_hms(y, m, d, hh, mm, ss)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn boundaries_in_winter() {
    assert_eq!(TradingSession::at(et(2024, 1, 8, 9, 29, 59)), TradingSession::Premarket);
    assert_eq!(TradingSession::at(et(2024, 1, 8, 9, 30, 0)), TradingSession::Regular);
    assert_eq!(TradingSession::at(et(2024, 1, 8, 16, 0, 0)), TradingSession::Regular);
    assert_eq!(TradingSession::at(et(2024, 1, 8, 16, 0, 1)), TradingSession::AfterHours);
}

#[test]
fn boundaries_in_summer() {
    assert_eq!(TradingSession::at(et(2024, 7, 8, 9, 29, 59)), TradingSession::Premarket);
    assert_eq!(TradingSession::at(et(2024, 7, 8, 9, 30, 0)), TradingSession::Regular);
    assert_eq!(TradingSession::at(et(2024, 7, 8, 16, 0, 0)), TradingSession::Regular);
    assert_eq!(TradingSession::at(et(2024, 7, 8, 16, 0, 1)), TradingSession::AfterHours);
}

#[test]
fn premarket_starts_at_four() {
    assert_eq!(TradingSession::at(et(2024, 1, 8, 3, 59, 59)), TradingSession::AfterHours);
    assert_eq!(TradingSession::at(et(2024, 1, 8, 4, 0, 0)), TradingSession::Premarket);
}

#[test]
fn session_label_does_not_move_reference() {
    // Same prices, three different sessions: reference never changes.
    let times = [
        et(2024, 1, 8, 8, 0, 0),
        et(2024, 1, 8, 11, 0, 0),
        et(2024, 1, 8, 18, 0, 0),
    ];
    for now in times {
        let out = evaluate(&GapInput::new(50.0, None, 51.0, now)).unwrap();
        assert_eq!(out.reference_price, 51.0);
        assert_eq!(out.reference_source, ReferenceSource::CurrentPrice);
    }
}
