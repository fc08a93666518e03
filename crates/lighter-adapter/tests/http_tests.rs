/*
[INPUT]:  Client options and mock HTTP servers
[OUTPUT]: Test results for client construction and transport behavior
[POS]:    Integration tests - client builder and options
[UPDATE]: When client options or defaults change
*/

mod common;

use std::time::Duration;

use common::{mock_client_builder, order_book_details_json, setup_mock_server};
use lighter_adapter::http::{with_custom_headers, with_local_addr, with_proxy};
use lighter_adapter::{
    LighterClient, LighterError, NextNonce, OrderBookDetailsResponse, ProxyRule, TlsPolicy,
};
use reqwest::Method;
use rstest::rstest;
use tokio_test::assert_ok;
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[rstest]
#[case("https://mainnet.zklighter.elliot.ai")]
#[case("http://127.0.0.1:9000")]
#[case("mainnet")]
#[case(" ")]
fn test_non_empty_endpoint_is_recorded(#[case] endpoint: &str) {
    let client = assert_ok!(LighterClient::new(endpoint));
    assert_eq!(client.endpoint(), endpoint);
}

#[test]
fn test_empty_endpoint_fails() {
    let err = LighterClient::with_options("", [with_proxy("http://127.0.0.1:8080")]).unwrap_err();
    assert!(matches!(err, LighterError::EmptyEndpoint));
    assert!(err.is_config_error());
}

#[test]
fn test_custom_headers_last_write_wins() {
    let client = assert_ok!(LighterClient::with_options(
        "https://mainnet.zklighter.elliot.ai",
        [
            with_custom_headers([("A", "1")]),
            with_custom_headers([("A", "2"), ("B", "3")]),
        ],
    ));

    let headers = client.config().default_headers();
    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get("A").unwrap(), "2");
    assert_eq!(headers.get("B").unwrap(), "3");
}

#[test]
fn test_malformed_proxy_returns_error() {
    let err = LighterClient::with_options(
        "https://mainnet.zklighter.elliot.ai",
        [with_proxy("::::not a url")],
    )
    .unwrap_err();
    assert!(matches!(err, LighterError::InvalidProxyUrl { .. }));
}

#[test]
fn test_local_addr_is_dial_source() {
    let client = assert_ok!(LighterClient::with_options(
        "https://mainnet.zklighter.elliot.ai",
        [with_local_addr("10.0.0.5")],
    ));

    let dialer = client.transport_settings().unwrap().dialer.unwrap();
    assert_eq!(dialer.local_addr, Some("10.0.0.5".parse().unwrap()));
    assert_eq!(dialer.local_socket_addr().unwrap().port(), 0);
    assert_eq!(dialer.timeout, Duration::from_secs(10));
    assert_eq!(dialer.keep_alive, Duration::from_secs(60));
}

#[test]
fn test_invalid_local_addr_returns_error() {
    let err = LighterClient::with_options(
        "https://mainnet.zklighter.elliot.ai",
        [with_local_addr("10.0.0")],
    )
    .unwrap_err();
    assert!(matches!(err, LighterError::InvalidLocalAddress { .. }));
}

#[test]
fn test_default_pool_limits() {
    let client = assert_ok!(LighterClient::new("https://mainnet.zklighter.elliot.ai"));
    let settings = client.transport_settings().unwrap();

    assert_eq!(settings.max_conns_per_host, Some(1000));
    assert_eq!(settings.max_idle_per_host, Some(100));
    assert_eq!(settings.idle_timeout, Some(Duration::from_secs(10)));
    assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(settings.tls, Some(TlsPolicy::Verify));
    assert_eq!(settings.proxy, Some(ProxyRule::Environment));
}

#[test]
fn test_zero_pool_caps_rejected() {
    let err = LighterClient::builder("https://mainnet.zklighter.elliot.ai")
        .pool_limits(0, 0, Duration::ZERO)
        .build()
        .unwrap_err();
    assert!(matches!(err, LighterError::Config(_)));
    assert!(err.is_config_error());
}

#[test]
fn test_fat_finger_protection_is_readable() {
    let default_client = assert_ok!(LighterClient::new("https://mainnet.zklighter.elliot.ai"));
    assert!(default_client.fat_finger_protection());

    let client = assert_ok!(
        LighterClient::builder("https://mainnet.zklighter.elliot.ai")
            .fat_finger_protection(false)
            .build()
    );
    assert!(!client.fat_finger_protection());
}

#[tokio::test]
async fn test_requests_route_through_fixed_proxy() {
    let proxy = setup_mock_server().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 200,
            "nonce": 722,
        })))
        .expect(1)
        .mount(&proxy)
        .await;

    let client = assert_ok!(
        LighterClient::builder("http://lighter.invalid")
            .proxy(proxy.uri())
            .build()
    );
    assert_eq!(
        client.transport_settings().unwrap().proxy_url().map(|url| url.as_str().trim_end_matches('/')),
        Some(proxy.uri().as_str())
    );

    let builder = assert_ok!(client.request(Method::GET, "/api/v1/nextNonce"));
    let response = assert_ok!(builder.send().await);
    let nonce: NextNonce = assert_ok!(response.json().await);
    assert_eq!(nonce.nonce, 722);

    let received = proxy.received_requests().await.expect("request recording");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].headers.get("host").unwrap(), "lighter.invalid");
}

#[tokio::test]
async fn test_default_headers_sent_with_requests() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orderBookDetails"))
        .and(query_param("market_id", "1"))
        .and(header("x-api-key", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_book_details_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(
        mock_client_builder(&server)
            .custom_headers([("X-Api-Key", "abc")])
            .build()
    );

    let builder = assert_ok!(client.request(Method::GET, "/api/v1/orderBookDetails?market_id=1"));
    let response = assert_ok!(builder.send().await);
    let details: OrderBookDetailsResponse = assert_ok!(response.json().await);

    assert!(details.result.is_ok());
    assert_eq!(details.order_book_details.len(), 2);
}

#[tokio::test]
async fn test_local_addr_binding_reaches_server() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = assert_ok!(mock_client_builder(&server).local_addr("127.0.0.1").build());

    let builder = assert_ok!(client.request(Method::GET, "/api/v1/status"));
    let response = assert_ok!(builder.send().await);
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_request_timeout_applies() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = assert_ok!(
        mock_client_builder(&server)
            .timeout(Duration::from_millis(200))
            .build()
    );

    let builder = assert_ok!(client.request(Method::GET, "/api/v1/slow"));
    let err = builder.send().await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_clones_share_transport_across_tasks() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(8)
        .mount(&server)
        .await;

    let client = assert_ok!(mock_client_builder(&server).build());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let builder = client.request(Method::GET, "/api/v1/status")?;
            let response = builder.send().await?;
            Ok::<_, LighterError>(response.status().as_u16())
        }));
    }

    for handle in handles {
        let status = assert_ok!(handle.await.expect("task"));
        assert_eq!(status, 200);
    }
}
