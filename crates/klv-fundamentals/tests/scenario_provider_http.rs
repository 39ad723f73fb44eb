//! Both providers against a local mock server. No real network.

use std::time::Duration;

use httpmock::prelude::*;
use klv_fundamentals::*;
use serde_json::json;

const KEY: &str = "test-key";
const TIMEOUT: Duration = Duration::from_secs(5);

fn fmp(server: &MockServer) -> FmpProvider {
    FmpProvider::new_with_base_url(KEY.to_string(), server.base_url(), TIMEOUT).unwrap()
}

fn alpha(server: &MockServer) -> AlphaVantageProvider {
    AlphaVantageProvider::new_with_base_url(KEY.to_string(), server.base_url(), TIMEOUT).unwrap()
}

// ---------------------------------------------------------------------------
// Financial Modeling Prep
// ---------------------------------------------------------------------------

#[test]
fn fmp_success_returns_both_metrics() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v4/company-outlook")
            .query_param("symbol", "AAPL")
            .query_param("apikey", KEY);
        then.status(200).json_body(json!({
            "profile": { "symbol": "AAPL" },
            "metrics": {
                "shortPercentageOfFloat": 0.71,
                "institutionalOwnershipPercentage": 61.2
            }
        }));
    });

    let row = fundamentals_row(&fmp(&server), "aapl");
    m.assert();
    assert_eq!(row, ["0.71".to_string(), "61.2".to_string()]);
}

#[test]
fn fmp_without_metrics_is_not_available() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v4/company-outlook");
        then.status(200).json_body(json!({ "profile": {} }));
    });

    assert_eq!(fundamentals_row(&fmp(&server), "ZZZZ"), not_available_row());
}

#[test]
fn fmp_null_metric_is_not_available() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v4/company-outlook");
        then.status(200).json_body(json!({
            "metrics": { "shortPercentageOfFloat": null, "institutionalOwnershipPercentage": 55 }
        }));
    });

    let err = fmp(&server).fetch("AAPL").unwrap_err();
    assert_eq!(
        err,
        ProviderError::MissingField("metrics.shortPercentageOfFloat")
    );
}

#[test]
fn fmp_error_status_body_is_still_inspected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v4/company-outlook");
        then.status(403)
            .json_body(json!({ "Error Message": "Invalid API KEY." }));
    });

    assert_eq!(fundamentals_row(&fmp(&server), "AAPL"), not_available_row());
}

#[test]
fn fmp_html_body_is_error_row() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v4/company-outlook");
        then.status(502).body("<html>bad gateway</html>");
    });

    let row = fundamentals_row(&fmp(&server), "AAPL");
    assert_eq!(row[0], "Error");
    assert!(row[1].starts_with("decode error"), "{}", row[1]);
}

// ---------------------------------------------------------------------------
// Alpha Vantage
// ---------------------------------------------------------------------------

#[test]
fn alpha_vantage_success() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("function", "OVERVIEW")
            .query_param("symbol", "MSFT")
            .query_param("apikey", KEY);
        then.status(200).json_body(json!({
            "Symbol": "MSFT",
            "ShortPercentFloat": "0.0071",
            "PercentInstitutions": "73.52"
        }));
    });

    let row = fundamentals_row(&alpha(&server), "MSFT");
    m.assert();
    assert_eq!(row, ["0.0071".to_string(), "73.52".to_string()]);
}

#[test]
fn alpha_vantage_rate_limit_note_is_not_available() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(200).json_body(json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
        }));
    });

    assert_eq!(fundamentals_row(&alpha(&server), "MSFT"), not_available_row());
}

#[test]
fn alpha_vantage_none_marker_is_not_available() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(200).json_body(json!({
            "ShortPercentFloat": "None",
            "PercentInstitutions": "73.52"
        }));
    });

    assert_eq!(fundamentals_row(&alpha(&server), "MSFT"), not_available_row());
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

#[test]
fn connection_refused_is_error_row_without_key() {
    // Nothing listens on port 1.
    let p = FmpProvider::new_with_base_url(
        "secret-key-value".to_string(),
        "http://127.0.0.1:1".to_string(),
        TIMEOUT,
    )
    .unwrap();

    let row = fundamentals_row(&p, "AAPL");
    assert_eq!(row[0], "Error");
    assert!(row[1].starts_with("transport error"), "{}", row[1]);
    assert!(!row[1].contains("secret-key-value"));
}

#[test]
fn blank_symbol_never_hits_the_network() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let row = fundamentals_row(&alpha(&server), "   ");
    assert_eq!(row[0], "Error");
    m.assert_hits(0);
}
