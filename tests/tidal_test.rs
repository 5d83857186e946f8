use std::time::{Duration, Instant};

use serde_json::{Value, json};
use spotidal::{
    MigrationError,
    config::TidalSettings,
    http::{RateLimitedClient, RetryPolicy},
    oauth::AuthorizationGrant,
    tidal::{self, TidalClient, build_search_query},
    types::MatchResult,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        default_wait: Duration::from_millis(20),
        margin: Duration::ZERO,
        max_retries: Some(5),
    }
}

fn client(server: &MockServer) -> TidalClient {
    TidalClient::with_policy(&server.uri(), "token".to_string(), "DE", fast_policy()).unwrap()
}

fn search_hit(ids: &[&str]) -> Value {
    let tracks: Vec<Value> = ids.iter().map(|id| json!({"id": id, "type": "tracks"})).collect();
    json!({"data": {"id": "q", "type": "searchResults", "relationships": {"tracks": {"data": tracks}}}})
}

#[test]
fn test_build_search_query() {
    assert_eq!(
        build_search_query("Song A", &["Artist X", "Artist Y"]),
        "Song%20A%20Artist%20X%20Artist%20Y"
    );
    assert_eq!(build_search_query("Back In Black", &["AC/DC"]), "Back%20In%20Black%20AC%2FDC");
    assert_eq!(build_search_query("Intro", &[]), "Intro");
}

#[tokio::test]
async fn test_search_returns_first_track() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/searchResults/Back%20In%20Black%20AC%2FDC"))
        .and(query_param("countryCode", "DE"))
        .and(query_param("explicitFilter", "include"))
        .and(query_param("include", "tracks"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hit(&["77", "88"])))
        .mount(&server)
        .await;

    let result = client(&server)
        .search_track("Back In Black", &["AC/DC"])
        .await
        .unwrap();

    assert_eq!(
        result,
        MatchResult::Matched {
            destination_track_id: "77".to_string()
        }
    );
}

#[tokio::test]
async fn test_search_without_tracks_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hit(&[])))
        .mount(&server)
        .await;

    let result = client(&server).search_track("Nothing", &["Nobody"]).await.unwrap();
    assert_eq!(result, MatchResult::NotFound);
}

#[tokio::test]
async fn test_search_empty_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client(&server).search_track("Song", &["A"]).await.unwrap_err();
    assert!(matches!(err, MigrationError::Search { .. }));
}

#[tokio::test]
async fn test_search_malformed_bodies_are_errors() {
    for body in [json!([]), json!({"data": null}), json!({"data": {}})] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let result = client(&server).search_track("Song", &["A"]).await;
        assert!(
            matches!(result, Err(MigrationError::Search { .. })),
            "{body} -> {result:?}"
        );
    }
}

#[tokio::test]
async fn test_search_server_error_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).search_track("Song", &["A"]).await.unwrap_err();
    match err {
        MigrationError::Search { query, reason } => {
            assert_eq!(query, "Song%20A");
            assert!(reason.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_playlist() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/playlists"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"data": {"id": "p1", "type": "playlists"}})),
        )
        .mount(&server)
        .await;

    let id = client(&server).create_playlist("Road Trip").await.unwrap();
    assert_eq!(id, "p1");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["data"]["type"], "playlists");
    assert_eq!(body["data"]["attributes"]["name"], "Road Trip");
    assert_eq!(body["data"]["attributes"]["accessType"], "PUBLIC");
    assert_eq!(
        body["data"]["attributes"]["description"],
        tidal::playlist::PLAYLIST_DESCRIPTION
    );
}

#[tokio::test]
async fn test_create_playlist_requires_created_status() {
    for status in [200, 400] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/playlists"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({"data": {"id": "p1", "type": "playlists"}})),
            )
            .mount(&server)
            .await;

        let err = client(&server).create_playlist("Road Trip").await.unwrap_err();
        match err {
            MigrationError::Create { name, status: got, .. } => {
                assert_eq!(name, "Road Trip");
                assert_eq!(got.as_u16(), status);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_add_tracks_in_chunks_of_twenty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/playlists/p1/relationships/items"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let delay = Duration::from_millis(300);
    let ids: Vec<String> = (0..45).map(|i| i.to_string()).collect();

    let started = Instant::now();
    let inserted = client(&server)
        .add_tracks("p1", "Road Trip", &ids, 20, delay)
        .await;
    let elapsed = started.elapsed();

    assert_eq!(inserted, 45);
    // one pause between each pair of chunks, none before the first or after the last
    assert!(elapsed >= delay * 2, "{elapsed:?}");
    assert!(elapsed < delay * 3, "{elapsed:?}");

    let requests = server.received_requests().await.unwrap();
    let sizes: Vec<usize> = requests
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["data"].as_array().unwrap().len()
        })
        .collect();
    assert_eq!(sizes, vec![20, 20, 5]);

    let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(first["data"][0], json!({"id": "0", "type": "tracks"}));
    let last: Value = serde_json::from_slice(&requests[2].body).unwrap();
    assert_eq!(last["data"][4]["id"], "44");
}

#[tokio::test]
async fn test_single_chunk_is_not_delayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..20).map(|i| i.to_string()).collect();

    let started = Instant::now();
    let inserted = client(&server)
        .add_tracks("p1", "Road Trip", &ids, 20, Duration::from_secs(2))
        .await;

    assert_eq!(inserted, 20);
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_chunk_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..25).map(|i| i.to_string()).collect();
    let inserted = client(&server)
        .add_tracks("p1", "Road Trip", &ids, 20, Duration::ZERO)
        .await;

    assert_eq!(inserted, 5);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_no_tracks_sends_nothing() {
    let server = MockServer::start().await;

    let inserted = client(&server)
        .add_tracks("p1", "Empty", &[], 20, Duration::ZERO)
        .await;

    assert_eq!(inserted, 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exchange_code_sends_verifier() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("client_id=tidal-id"))
        .and(body_string_contains("code_verifier=verifier"))
        .and(body_string_contains("code=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tt"})))
        .mount(&server)
        .await;

    let settings = TidalSettings {
        client_id: "tidal-id".to_string(),
        api_url: server.uri(),
        auth_url: format!("{}/authorize", server.uri()),
        token_url: format!("{}/oauth2/token", server.uri()),
        redirect_port: 3000,
        country_code: "DE".to_string(),
    };
    let grant = AuthorizationGrant {
        code: "abc".to_string(),
        code_verifier: Some("verifier".to_string()),
    };
    let http = RateLimitedClient::new(tidal::PROVIDER, fast_policy()).unwrap();

    let token = tidal::auth::exchange_code(&http, &settings, &grant).await.unwrap();
    assert_eq!(token, "tt");

    let without_verifier = AuthorizationGrant {
        code_verifier: None,
        ..grant
    };
    let err = tidal::auth::exchange_code(&http, &settings, &without_verifier)
        .await
        .unwrap_err();
    assert!(matches!(err, MigrationError::Config(_)));
}
