//! End-to-end boundary contract: two inbound buffers, one envelope out.

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tickwire_core::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use tickwire_core::PriceResult;
use tickwire_guest::PriceGuest;

struct CannedHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl CannedHttpClient {
    fn respond_with(response: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn recorded(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for CannedHttpClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        self.response.clone()
    }
}

#[derive(Debug, Deserialize)]
struct SuccessWire {
    success: bool,
    error: String,
    value: PriceResult,
}

#[derive(Debug, Deserialize)]
struct FailureWire {
    #[serde(rename = "Success")]
    success: bool,
    #[serde(rename = "Error")]
    error: String,
    #[serde(rename = "Value")]
    value: Option<serde_json::Value>,
}

const COINBASE_TICKERS: &str = r#"{
    "tickers": [
        {
            "base": "BTC",
            "market": { "name": "Binance" },
            "converted_last": { "usd": 26990.0 },
            "timestamp": "2024-01-01T00:00:10Z"
        },
        {
            "base": "BTC",
            "market": { "name": "Coinbase" },
            "converted_last": { "usd": 27000.5 },
            "timestamp": "2024-01-01T00:00:00Z"
        }
    ]
}"#;

const REQUEST: &[u8] = br#"{"market": "Coinbase", "coin_id": "bitcoin"}"#;
const SECRET: &[u8] = br#"{"api_key": "cg-demo-key"}"#;

#[test]
fn coinbase_scenario_resolves_the_expected_price() {
    let client = CannedHttpClient::respond_with(Ok(HttpResponse::ok_json(COINBASE_TICKERS)));
    let guest = PriceGuest::new(client.clone());

    let bytes = guest.handle(REQUEST, SECRET);
    let wire: SuccessWire = serde_json::from_slice(&bytes).expect("success envelope must parse");

    assert!(wire.success);
    assert_eq!(wire.error, "");
    assert_eq!(wire.value.market, "Coinbase");
    assert_eq!(wire.value.coin_id, "BTC");
    assert_eq!(wire.value.currency, "USD");
    assert_eq!(wire.value.price, 2_700_050_000);
    assert_eq!(wire.value.timestamp, 1_704_067_200);

    let requests = client.recorded();
    assert_eq!(requests.len(), 1, "exactly one upstream fetch per call");
    assert_eq!(
        requests[0].url,
        "https://api.coingecko.com/api/v3/coins/bitcoin/tickers"
    );
    assert_eq!(
        requests[0]
            .headers
            .get("x-cg-demo-api-key")
            .map(String::as_str),
        Some("cg-demo-key")
    );
}

#[test]
fn success_envelope_round_trips_field_values() {
    let guest = PriceGuest::new(CannedHttpClient::respond_with(Ok(HttpResponse::ok_json(
        COINBASE_TICKERS,
    ))));

    let first = guest.handle(REQUEST, SECRET);
    let decoded: SuccessWire = serde_json::from_slice(&first).expect("must parse");
    let re_encoded = tickwire_core::encode_success(&decoded.value);
    let second: SuccessWire = serde_json::from_slice(&re_encoded).expect("must parse");

    assert_eq!(decoded.value, second.value);
}

#[test]
fn missing_market_yields_a_not_found_failure() {
    let body = r#"{"tickers": [
        {"base": "BTC", "market": {"name": "Kraken"},
         "converted_last": {"usd": 26950.0}, "timestamp": "2024-01-01T00:00:00Z"}
    ]}"#;
    let guest = PriceGuest::new(CannedHttpClient::respond_with(Ok(HttpResponse::ok_json(
        body,
    ))));

    let bytes = guest.handle(REQUEST, SECRET);
    let wire: FailureWire = serde_json::from_slice(&bytes).expect("failure envelope must parse");

    assert!(!wire.success);
    assert!(wire.error.contains("Coinbase"));
    assert!(wire.value.is_none());
}

#[test]
fn malformed_upstream_body_yields_a_decode_failure() {
    let guest = PriceGuest::new(CannedHttpClient::respond_with(Ok(HttpResponse::ok_json(
        r#"{"tickers": "not an array"}"#,
    ))));

    let bytes = guest.handle(REQUEST, SECRET);
    let wire: FailureWire = serde_json::from_slice(&bytes).expect("failure envelope must parse");

    assert!(!wire.success);
    assert!(wire.error.contains("decoding upstream tickers"));
}

#[test]
fn upstream_error_status_yields_a_status_failure() {
    let guest = PriceGuest::new(CannedHttpClient::respond_with(Ok(HttpResponse {
        status: 429,
        body: String::from("too many requests"),
    })));

    let bytes = guest.handle(REQUEST, SECRET);
    let wire: FailureWire = serde_json::from_slice(&bytes).expect("failure envelope must parse");

    assert!(!wire.success);
    assert!(wire.error.contains("status code 429"));
}

#[test]
fn negative_upstream_price_fails_instead_of_wrapping() {
    let body = r#"{"tickers": [
        {"base": "BTC", "market": {"name": "Coinbase"},
         "converted_last": {"usd": -1.5}, "timestamp": "2024-01-01T00:00:00Z"}
    ]}"#;
    let guest = PriceGuest::new(CannedHttpClient::respond_with(Ok(HttpResponse::ok_json(
        body,
    ))));

    let bytes = guest.handle(REQUEST, SECRET);
    let wire: FailureWire = serde_json::from_slice(&bytes).expect("failure envelope must parse");

    assert!(!wire.success);
    assert!(wire.error.contains("unusable usd price"));
}

#[test]
fn every_envelope_populates_exactly_one_side() {
    let cases: Vec<(Arc<CannedHttpClient>, bool)> = vec![
        (
            CannedHttpClient::respond_with(Ok(HttpResponse::ok_json(COINBASE_TICKERS))),
            true,
        ),
        (
            CannedHttpClient::respond_with(Ok(HttpResponse::ok_json("{}"))),
            false,
        ),
        (
            CannedHttpClient::respond_with(Err(HttpError::new("connection reset"))),
            false,
        ),
        (
            CannedHttpClient::respond_with(Ok(HttpResponse {
                status: 500,
                body: String::new(),
            })),
            false,
        ),
    ];

    for (client, expect_success) in cases {
        let guest = PriceGuest::new(client);
        let bytes = guest.handle(REQUEST, SECRET);
        let wire: serde_json::Value =
            serde_json::from_slice(&bytes).expect("every envelope must be valid JSON");

        if expect_success {
            assert_eq!(wire["success"], true);
            assert_eq!(wire["error"], "");
            assert!(!wire["value"].is_null());
        } else {
            assert_eq!(wire["Success"], false);
            assert_ne!(wire["Error"], "");
            assert!(wire["Value"].is_null());
        }
    }
}

#[test]
fn api_key_never_appears_in_failure_envelopes() {
    let guest = PriceGuest::new(CannedHttpClient::respond_with(Ok(HttpResponse {
        status: 401,
        body: String::from("unauthorized"),
    })));

    let bytes = guest.handle(REQUEST, SECRET);
    let rendered = String::from_utf8(bytes).expect("envelope is utf-8");
    assert!(!rendered.contains("cg-demo-key"));
}
