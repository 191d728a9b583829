//! HTTP-level tests for the exchangeratesapi.io client.
//!
//! A local wiremock server stands in for the provider.

use chrono::{DateTime, NaiveDate};
use fxrates_client::{ExchangeRatesApiClient, ProviderConfig};
use fxrates_types::{ProviderError, RateProvider};
use rust_decimal_macros::dec;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a client pointed at the mock server.
fn client_for(server: &MockServer) -> ExchangeRatesApiClient {
    let config = ProviderConfig::new(Some("test-key".into()))
        .unwrap()
        .with_base_url(&server.uri())
        .unwrap();
    ExchangeRatesApiClient::new(config).unwrap()
}

const LATEST_USD: &str = r#"{
    "success": true,
    "timestamp": 1519296206,
    "base": "USD",
    "date": "2021-03-17",
    "rates": {"USD": 1, "GBP": 0.72007, "JPY": 107.346001, "EUR": 0.813399}
}"#;

#[tokio::test]
async fn test_fetch_symbols_sends_access_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/symbols"))
        .and(query_param("access_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": true, "symbols": {"AED": "United Arab Emirates Dirham", "AFN": "Afghan Afghani"}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let symbols = client_for(&server).fetch_symbols().await.unwrap();

    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols.name("AFN"), Some("Afghan Afghani"));
}

#[tokio::test]
async fn test_fetch_latest_decodes_exact_decimals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("base", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LATEST_USD, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_latest("USD").await.unwrap();

    assert_eq!(snapshot.base.as_ref().map(|b| b.as_str()), Some("USD"));
    assert_eq!(snapshot.timestamp, DateTime::from_timestamp(1519296206, 0));
    assert_eq!(snapshot.rate("JPY"), Some(dec!(107.346001)));
    assert_eq!(snapshot.rate("EUR"), Some(dec!(0.813399)));
    assert_eq!(snapshot.rate("USD"), Some(dec!(1)));
}

#[tokio::test]
async fn test_fetch_latest_forbidden_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("base", "EUR"))
        .respond_with(ResponseTemplate::new(403).set_body_raw(
            r#"{"success": false, "error": {"code": 105, "type": "base_currency_access_restricted"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_latest("EUR").await.unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(err.status(), Some(403));
    match err {
        ProviderError::Status { message, .. } => {
            assert_eq!(message, "base_currency_access_restricted")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_latest_server_error_is_not_forbidden() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_latest("USD").await.unwrap_err();

    assert!(!err.is_forbidden());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_success_false_body_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": false, "error": {"code": 105, "type": "base_currency_access_restricted", "info": "Access Restricted"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_latest("GBP").await.unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(
        err,
        ProviderError::Api {
            code: 105,
            kind: "base_currency_access_restricted".into(),
            info: Some("Access Restricted".into()),
        }
    );
}

#[tokio::test]
async fn test_symbols_checks_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/symbols"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"message": "Invalid authentication credentials"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_symbols().await.unwrap_err();

    assert_eq!(
        err,
        ProviderError::Status {
            status: 401,
            message: "Invalid authentication credentials".into(),
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/symbols"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_symbols().await.unwrap_err();

    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_historical_uses_dated_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2013-01-14"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("base", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": true, "historical": true, "timestamp": 1358150409, "base": "USD", "date": "2013-01-14", "rates": {"USD": 1, "AED": 3.666311, "AFN": 51.2281}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let date = NaiveDate::from_ymd_opt(2013, 1, 14).unwrap();
    let snapshot = client_for(&server)
        .fetch_historical(date, "USD")
        .await
        .unwrap();

    assert_eq!(snapshot.date, Some(date));
    assert_eq!(snapshot.rate("AED"), Some(dec!(3.666311)));
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let config = ProviderConfig::new(Some("test-key".into()))
        .unwrap()
        .with_base_url("http://127.0.0.1:1")
        .unwrap();
    let client = ExchangeRatesApiClient::new(config).unwrap();

    let err = client.fetch_latest("USD").await.unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)));
    assert!(!err.to_string().contains("test-key"));
}
