use std::io::Write;
use std::time::Duration;

use fiatconv::{
    Config, ConversionRequest, ConvertError, CurrencyCode, ExchangeRateClient, RateFetcher,
    SymbolsMode, convert_currency, convert_input,
};
use mockito::{Matcher, Server};
use reqwest::{Client, StatusCode};
use rust_decimal_macros::dec;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::parse(s).unwrap()
}

fn latest_query(base: &str, symbols: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("base".into(), base.into()),
        Matcher::UrlEncoded("symbols".into(), symbols.into()),
    ])
}

fn direct_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

fn client_for(server: &Server) -> ExchangeRateClient {
    ExchangeRateClient::new(&server.url(), direct_client()).unwrap()
}

#[tokio::test]
async fn returns_rate_for_target() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/latest")
        .match_query(latest_query("USD", "EUR"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"rates":{"EUR":0.89}}"#)
        .create_async()
        .await;

    let rate = client_for(&server)
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap();

    assert_eq!(rate, dec!(0.89));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_target_is_rate_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/latest")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"rates":{"JPY":123.0}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap_err();

    match err {
        ConvertError::RateNotFound(missing) => assert_eq!(missing.as_str(), "EUR"),
        other => panic!("expected RateNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_not_decoded() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/latest")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"rates":{"EUR":0.89}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::UnexpectedStatus(status) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/latest")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("test")
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Decode(_)));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let client = ExchangeRateClient::new("http://127.0.0.1:1", direct_client()).unwrap();

    let err = client
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Network(_)));
}

#[tokio::test]
async fn slow_response_times_out_as_network_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/latest")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(2));
            w.write_all(br#"{"rates":{"EUR":0.89}}"#)
        })
        .create_async()
        .await;

    let client = Client::builder()
        .no_proxy()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = ExchangeRateClient::new(&server.url(), client)
        .unwrap()
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap_err();

    match err {
        ConvertError::Network(source) => assert!(source.is_timeout()),
        other => panic!("expected Network timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn zero_rate_is_rejected() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/latest")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"rates":{"EUR":1e-30}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::InvalidRate { .. }));
}

#[tokio::test]
async fn base_and_target_symbols_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/latest")
        .match_query(latest_query("USD", "USD,EUR"))
        .with_status(200)
        .with_body(r#"{"rates":{"USD":1.0,"EUR":0.89},"base":"USD","date":"2020-03-06"}"#)
        .create_async()
        .await;

    let rate = client_for(&server)
        .with_symbols(SymbolsMode::BaseAndTarget)
        .fetch_rate(&code("USD"), &code("EUR"))
        .await
        .unwrap();

    assert_eq!(rate, dec!(0.89));
    mock.assert_async().await;
}

#[tokio::test]
async fn api_url_path_prefix_is_kept() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/latest")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("access_key".into(), "secret".into()),
            Matcher::UrlEncoded("base".into(), "GBP".into()),
            Matcher::UrlEncoded("symbols".into(), "JPY".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"rates":{"JPY":140.5}}"#)
        .create_async()
        .await;

    let api_url = format!("{}/v1?access_key=secret", server.url());
    let client = ExchangeRateClient::new(&api_url, direct_client()).unwrap();
    let rate = client.fetch_rate(&code("GBP"), &code("JPY")).await.unwrap();

    assert_eq!(rate, dec!(140.5));
    mock.assert_async().await;
}

#[tokio::test]
async fn converts_with_fetched_rate() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/latest")
        .match_query(latest_query("USD", "EUR"))
        .with_status(200)
        .with_body(r#"{"rates":{"EUR":0.89}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let request = ConversionRequest::new(dec!(1.23), "USD", "EUR").unwrap();
    let result = convert_currency(&client, &request).await.unwrap();

    assert_eq!(result.amount, dec!(1.0947));
    assert_eq!(result.to_string(), "USD 1.23 -> EUR 1.0947");
    mock.assert_async().await;
}

#[tokio::test]
async fn requests_go_through_proxy() {
    let mut proxy = Server::new_async().await;
    let mock = proxy
        .mock("GET", "/latest")
        .match_query(latest_query("EUR", "CHF"))
        .with_status(200)
        .with_body(r#"{"rates":{"CHF":0.95}}"#)
        .create_async()
        .await;

    let config = Config {
        api_url: "http://rates.example.invalid".to_string(),
        proxy: Some(proxy.url()),
        ..Config::default()
    };
    let client = config.exchange_client().unwrap();
    let rate = client.fetch_rate(&code("EUR"), &code("CHF")).await.unwrap();

    assert_eq!(rate, dec!(0.95));
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_input_sends_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = convert_input(&client, dec!(1.23), "---", "EUR")
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::InvalidCurrencyCode(_)));
    mock.assert_async().await;
}
