use std::time::{Duration, Instant};

use reqwest::StatusCode;
use spotidal::{
    MigrationError,
    http::{RateLimitedClient, RetryPolicy},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        default_wait: Duration::from_millis(50),
        margin: Duration::ZERO,
        max_retries: None,
    }
}

#[test]
fn test_wait_for_uses_retry_after_plus_margin() {
    let tidal = RetryPolicy::tidal();
    assert_eq!(tidal.wait_for(Some(3)), Duration::from_secs(4));
    assert_eq!(tidal.wait_for(None), Duration::from_secs(6));

    let spotify = RetryPolicy::spotify();
    assert_eq!(spotify.wait_for(Some(3)), Duration::from_secs(3));
    assert_eq!(spotify.wait_for(None), Duration::from_secs(5));
}

#[tokio::test]
async fn test_retries_after_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let http = RateLimitedClient::new("Test", fast_policy()).unwrap();
    let url = format!("{}/limited", server.uri());

    let started = Instant::now();
    let response = http.send(|client| client.get(&url)).await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(http.retry_count(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let http = RateLimitedClient::new("Test", fast_policy().with_max_retries(2)).unwrap();
    let url = server.uri();

    let err = http.send(|client| client.get(&url)).await.unwrap_err();

    assert!(matches!(
        err,
        MigrationError::RateLimited { retries: 2, .. }
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_non_success_status_carries_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "gone"})),
        )
        .mount(&server)
        .await;

    let http = RateLimitedClient::new("Test", fast_policy()).unwrap();
    let url = server.uri();

    let err = http.send(|client| client.get(&url)).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        MigrationError::Http { provider, body, .. } => {
            assert_eq!(provider, "Test");
            assert!(body.contains("gone"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // not retried
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let http =
        RateLimitedClient::with_timeout("Test", fast_policy(), Duration::from_millis(200)).unwrap();
    let url = server.uri();

    let err = http.send(|client| client.get(&url)).await.unwrap_err();
    assert!(matches!(err, MigrationError::Request(ref e) if e.is_timeout()));
}
