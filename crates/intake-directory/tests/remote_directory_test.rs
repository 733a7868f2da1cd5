//! Contract tests for RemoteDirectory against a wiremock directory service.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/countries` | `countries_*` |
//! | GET | `/countries/{country}/states` | `states_*` |
//! | GET | `/countries/{country}/states/{state}/cities` | `cities_*` |

use intake_core::Region;
use intake_directory::{DirectoryError, DirectoryProvider, RemoteDirectory, RemoteDirectoryConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote(server: &MockServer) -> RemoteDirectory {
    let cfg = RemoteDirectoryConfig::new(server.uri().parse().unwrap(), "test-api-key")
        .with_timeout_secs(5);
    RemoteDirectory::new(cfg).unwrap()
}

// ── GET /countries ───────────────────────────────────────────────────

#[tokio::test]
async fn countries_sends_api_key_and_parses_iso2_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .and(header("X-CSCAPI-KEY", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 233, "iso2": "US", "name": "United States"},
            {"id": 39, "iso2": "CA", "name": "Canada"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = remote(&server);
    let countries = dir.list_countries().await;
    assert_eq!(
        countries,
        vec![
            Region::new("US", "United States"),
            Region::new("CA", "Canada")
        ]
    );
}

#[tokio::test]
async fn countries_with_wrong_api_key_are_not_served() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .and(header("X-CSCAPI-KEY", "other-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    // Unmatched requests get 404 from wiremock.
    let dir = remote(&server);
    let err = dir.try_list_countries().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Status { status: 404, .. }));
}

#[tokio::test]
async fn custom_api_key_header_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .and(header("X-Api-Key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"code": "IN", "name": "India"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = RemoteDirectoryConfig::new(server.uri().parse().unwrap(), "test-api-key")
        .with_api_key_header("X-Api-Key");
    let dir = RemoteDirectory::new(cfg).unwrap();
    assert_eq!(dir.list_countries().await.len(), 1);
}

// ── GET /countries/{country}/states ──────────────────────────────────

#[tokio::test]
async fn states_are_fetched_for_the_country() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries/US/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"iso2": "NY", "name": "New York"},
            {"iso2": "CA", "name": "California"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = remote(&server);
    let states = dir.list_states("US").await;
    assert_eq!(states[0], Region::new("NY", "New York"));
    assert_eq!(states[1].code, "CA");
}

#[tokio::test]
async fn states_are_cached_for_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries/IN/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"iso2": "MH", "name": "Maharashtra"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = remote(&server);
    let first = dir.list_states("IN").await;
    let second = dir.list_states("IN").await;
    assert_eq!(first, second);
    assert_eq!(dir.cached_scopes(), 1);
}

#[tokio::test]
async fn states_server_error_fails_closed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries/US/states"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let dir = remote(&server);
    assert!(dir.list_states("US").await.is_empty());

    let err = dir.try_list_states("US").await.unwrap_err();
    match err {
        DirectoryError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn failures_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries/CA/states"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/countries/CA/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"iso2": "ON", "name": "Ontario"}
        ])))
        .mount(&server)
        .await;

    let dir = remote(&server);
    assert!(dir.list_states("CA").await.is_empty());
    // Re-selecting the parent retries.
    assert_eq!(dir.list_states("CA").await, vec![Region::new("ON", "Ontario")]);
}

#[tokio::test]
async fn malformed_body_fails_closed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries/US/states"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let dir = remote(&server);
    assert!(dir.list_states("US").await.is_empty());
    assert!(matches!(
        dir.try_list_states("US").await,
        Err(DirectoryError::Deserialization { .. })
    ));
}

#[tokio::test]
async fn blank_country_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = remote(&server);
    assert!(dir.list_states("").await.is_empty());
    assert!(dir.list_cities("US", "  ").await.is_empty());
}

// ── GET /countries/{country}/states/{state}/cities ───────────────────

#[tokio::test]
async fn cities_without_codes_use_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries/US/states/NY/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "New York City"},
            {"id": 2, "name": "Buffalo"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = remote(&server);
    let cities = dir.list_cities("US", "NY").await;
    assert_eq!(cities[0], Region::new("New York City", "New York City"));
    assert_eq!(cities[1].code, "Buffalo");
}

#[tokio::test]
async fn cities_are_scoped_by_country_and_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries/US/states/CA/cities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Los Angeles"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = remote(&server);
    assert_eq!(dir.list_cities("US", "CA").await.len(), 1);
    // Different parent scope: not served from the US/CA cache entry.
    assert!(dir.list_cities("CA", "CA").await.is_empty());
}
