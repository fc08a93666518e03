/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lighter-adapter tests

use lighter_adapter::{ClientBuilder, LighterClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Builder pointed at the mock server, isolated from proxy env vars
#[allow(dead_code)]
pub fn mock_client_builder(server: &MockServer) -> ClientBuilder {
    LighterClient::builder(server.uri()).no_proxy()
}

/// Order book details payload as served by the API
#[allow(dead_code)]
pub fn order_book_details_json() -> serde_json::Value {
    serde_json::json!({
        "code": 200,
        "order_book_details": [
            {
                "symbol": "ETH",
                "market_id": 0,
                "status": "active",
                "size_decimals": 4,
                "price_decimals": 2
            },
            {
                "symbol": "BTC",
                "market_id": 1,
                "status": "active",
                "size_decimals": 5,
                "price_decimals": 1
            }
        ]
    })
}
