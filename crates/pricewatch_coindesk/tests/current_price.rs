use pricewatch_coindesk::CoindeskClient;
use pricewatch_coindesk::current_price::CurrentPrice;
use serde_json::json;
use tokio::test;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRICE_PATH: &str = "/v1/bpi/currentprice.json";

fn client_for(server: &MockServer) -> CoindeskClient {
    CoindeskClient::with_endpoint(Some(format!("{}{PRICE_PATH}", server.uri())), None)
}

#[test]
pub async fn fetch_current_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "time": {
                "updated": "Mar 1, 2024 10:15:00 UTC",
                "updatedISO": "2024-03-01T10:15:00+00:00",
                "updateduk": "Mar 1, 2024 at 10:15 GMT"
            },
            "disclaimer": "test payload",
            "chartName": "Bitcoin",
            "bpi": {
                "USD": {
                    "code": "USD",
                    "symbol": "&#36;",
                    "rate": "61,234.568",
                    "description": "United States Dollar",
                    "rate_float": 61234.5678
                },
                "EUR": {
                    "code": "EUR",
                    "rate": "56,001.100",
                    "description": "Euro",
                    "rate_float": 56001.1
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .call0::<CurrentPrice>()
        .await
        .expect("Failed to fetch current price");

    assert_eq!(response.bpi.usd.rate_float, 61234.5678);
    assert_eq!(response.time.updated_iso, "2024-03-01T10:15:00+00:00");
    assert_eq!(response.bpi.eur.map(|eur| eur.code), Some("EUR".to_string()));
}

#[test]
pub async fn server_error_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRICE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .call0::<CurrentPrice>()
        .await
        .expect_err("503 must not decode");

    assert_eq!(error.status().map(|s| s.as_u16()), Some(503));
}

#[test]
pub async fn malformed_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .call0::<CurrentPrice>()
        .await
        .expect_err("html must not decode");

    assert!(error.is_decode());
}
