//! Route definitions for the directory stub.
//!
//! Serves the same paths the remote directory client calls, with bodies
//! that deserialize into its `Region` type.
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | GET | `/health` | none |
//! | GET | `/countries` | API key |
//! | GET | `/countries/{country}/states` | API key |
//! | GET | `/countries/{country}/states/{state}/cities` | API key |
//!
//! Unknown scopes answer `200 []`, matching the directory contract that an
//! unknown parent simply has no children.

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use intake_core::{ParentKey, Region};
use serde_json::json;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;

use crate::store::AppState;

/// Build the complete stub router.
pub fn router(state: AppState) -> Router {
    let regions = Router::new()
        .route("/countries", get(countries))
        .route("/countries/{country}/states", get(states))
        .route("/countries/{country}/states/{state}/cities", get(cities))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/health", get(health))
        .merge(regions)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Auth ────────────────────────────────────────────────────────────

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.api_key() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(state.api_key_header())
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if key_matches(key, expected) => next.run(request).await,
        Some(_) => {
            tracing::warn!("directory request rejected: invalid API key");
            error_response(StatusCode::UNAUTHORIZED, "invalid API key")
        }
        None => {
            tracing::warn!("directory request rejected: missing API key header");
            error_response(StatusCode::UNAUTHORIZED, "missing API key header")
        }
    }
}

fn key_matches(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": {
            "code": status.as_u16(),
            "message": message,
        }
    });
    (status, Json(body)).into_response()
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn countries(State(state): State<AppState>) -> Json<Vec<Region>> {
    Json(state.directory().lookup(&ParentKey::Root))
}

async fn states(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Json<Vec<Region>> {
    Json(state.directory().lookup(&ParentKey::country(country)))
}

async fn cities(
    State(state): State<AppState>,
    Path((country, region)): Path<(String, String)>,
) -> Json<Vec<Region>> {
    Json(state.directory().lookup(&ParentKey::state(country, region)))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "no such route")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderName;
    use intake_directory::config::DEFAULT_API_KEY_HEADER;
    use http_body_util::BodyExt;
    use intake_directory::{DirectoryProvider, LocalDirectory, RemoteDirectory, RemoteDirectoryConfig};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app(api_key: Option<&str>) -> Router {
        router(AppState::new(
            LocalDirectory::builtin(),
            api_key.map(str::to_string),
            HeaderName::from_static("x-cscapi-key"),
        ))
    }

    async fn serve(app: Router) -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });
        port
    }

    fn get_req(uri: &str, key: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(key) = key {
            builder = builder.header(DEFAULT_API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_200_without_key() {
        let app = test_app(Some("secret"));
        let resp = app.oneshot(get_req("/health", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn countries_listed_in_dataset_order() {
        let app = test_app(Some("secret"));
        let resp = app.oneshot(get_req("/countries", Some("secret"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let codes: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["code"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(codes, vec!["US", "CA", "IN"]);
    }

    #[tokio::test]
    async fn states_and_cities_by_scope() {
        let app = test_app(None);
        let resp = app
            .clone()
            .oneshot(get_req("/countries/CA/states", None))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body[0], json!({"code": "ON", "name": "Ontario"}));

        let resp = app
            .oneshot(get_req("/countries/US/states/CA/cities", None))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body[0]["name"], "Los Angeles");
    }

    #[tokio::test]
    async fn unknown_scope_is_empty_list() {
        let app = test_app(None);
        let resp = app
            .oneshot(get_req("/countries/ZZ/states", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn missing_key_is_401_with_json_body() {
        let app = test_app(Some("secret"));
        let resp = app.oneshot(get_req("/countries", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], 401);
        assert_eq!(body["error"]["message"], "missing API key header");
    }

    #[tokio::test]
    async fn wrong_key_is_401() {
        let app = test_app(Some("secret"));
        let resp = app
            .oneshot(get_req("/countries/US/states", Some("secreT")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = test_app(None);
        let resp = app.oneshot(get_req("/regions", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn key_comparison() {
        assert!(key_matches("abc", "abc"));
        assert!(!key_matches("abd", "abc"));
        assert!(!key_matches("ab", "abc"));
    }

    #[tokio::test]
    async fn remote_directory_reads_from_stub() {
        let port = serve(test_app(Some("stub-key"))).await;

        let cfg = RemoteDirectoryConfig::local_mock(port, "stub-key").unwrap();
        let dir = RemoteDirectory::new(cfg).unwrap();
        let cities = dir.list_cities("IN", "MH").await;
        let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Mumbai", "Pune"]);

        let wrong = RemoteDirectory::new(RemoteDirectoryConfig::local_mock(port, "nope").unwrap()).unwrap();
        assert!(wrong.list_countries().await.is_empty());
    }

    #[tokio::test]
    async fn custom_key_header_is_honoured() {
        let app = router(AppState::new(
            LocalDirectory::builtin(),
            Some("stub-key".to_string()),
            HeaderName::from_static("x-api-key"),
        ));

        let resp = app
            .clone()
            .oneshot(get_req("/countries", Some("stub-key")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = axum::http::Request::builder()
            .uri("/countries")
            .header("X-Api-Key", "stub-key")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let port = serve(app).await;
        let cfg = RemoteDirectoryConfig::local_mock(port, "stub-key")
            .unwrap()
            .with_api_key_header("X-Api-Key");
        let dir = RemoteDirectory::new(cfg).unwrap();
        assert_eq!(dir.list_countries().await.len(), 3);
    }
}
