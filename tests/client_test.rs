//! Integration tests for PracticumClient using wiremock

mod common;

use common::{client_for, API_TOKEN, STATUS_PATH};
use hwbot::api::PracticumClient;
use hwbot::utils::error::FetchError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test successful fetch with auth header and cursor
#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;
    let body = json!({
        "homeworks": [{"homework_name": "hw1", "status": "approved"}],
        "current_date": 1000
    });

    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .and(header("Authorization", format!("OAuth {API_TOKEN}").as_str()))
        .and(query_param("from_date", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value = tokio_test::assert_ok!(client.fetch(500).await);
    assert_eq!(value, body);
}

/// Test that a zero cursor is replaced by the current time
#[tokio::test]
async fn test_fetch_defaults_cursor_to_now() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"homeworks": []})))
        .mount(&mock_server)
        .await;

    let before = hwbot::utils::unix_now();
    let client = client_for(&mock_server);
    tokio_test::assert_ok!(client.fetch(0).await);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let from_date: i64 = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "from_date")
        .map(|(_, v)| v.parse().unwrap())
        .expect("from_date should be sent");
    assert!(from_date >= before);
}

/// Test non-200 status is a fetch failure carrying the code
#[tokio::test]
async fn test_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1) // No retry
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch(1).await.unwrap_err();

    assert!(matches!(err, FetchError::Status(500)));
    assert!(err.to_string().contains("500"));
}

/// Test that a 2xx other than 200 is still a failure
#[tokio::test]
async fn test_no_content_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch(1).await.unwrap_err();
    assert_eq!(err.status_code(), Some(204));
}

/// Test unparseable body is a decode failure
#[tokio::test]
async fn test_invalid_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.fetch(1).await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
}

/// Test connection failure
#[tokio::test]
async fn test_connection_refused() {
    let client = PracticumClient::new(
        "http://localhost:1/api/user_api/homework_statuses/",
        API_TOKEN,
        Duration::from_secs(1),
    )
    .unwrap();

    let result = client.fetch(1).await;
    assert!(matches!(
        result,
        Err(FetchError::Http(_)) | Err(FetchError::Timeout)
    ));
}

/// Test request timeout
#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"homeworks": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = PracticumClient::new(
        &format!("{}{STATUS_PATH}", mock_server.uri()),
        API_TOKEN,
        Duration::from_millis(100),
    )
    .unwrap();

    let result = client.fetch(1).await;
    assert!(matches!(result, Err(FetchError::Timeout)));
}
