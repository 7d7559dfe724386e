//! HTTP Handlers

use std::time::Duration;

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{OriginalUri, State},
    http::{HeaderMap, Method, header},
    response::Response,
};
use connect_core::session::ORGANIZATION_HEADER;
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Request headers passed through to the backend
const FORWARDED_HEADERS: [&str; 4] = [
    ORGANIZATION_HEADER,
    "authorization",
    "content-type",
    "accept",
];

/// Upper bound on the backend `/health` check
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub backend: String,
    pub backend_connected: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// True when the backend answers its `/health` within [`HEALTH_CHECK_TIMEOUT`]
pub async fn check_backend(state: &AppState) -> bool {
    state
        .http
        .get(format!("{}/health", state.config.backend_url))
        .timeout(HEALTH_CHECK_TIMEOUT)
        .send()
        .await
        .is_ok_and(|r| r.status().is_success())
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_connected = check_backend(&state).await;

    Json(HealthResponse {
        status: "healthy",
        service: "connect-console",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.config.backend_url.clone(),
        backend_connected,
    })
}

/// Forward `/api/v1/connect/*` to the payments backend unchanged.
///
/// The path and query are copied still percent-encoded.
pub async fn forward(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServerError> {
    let path = uri.path();
    let mut url = format!("{}{path}", state.config.backend_url);
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }

    tracing::debug!("{} {}", method, url);

    let mut request = state.http.request(method, &url).body(body);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(name) {
            request = request.header(name, value.clone());
        }
    }

    let upstream = request.send().await?;
    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream.bytes().await?;

    if !status.is_success() {
        tracing::warn!("backend answered {} for {}", status, path);
    }

    let mut response = Response::builder().status(status);
    if let Some(content_type) = content_type {
        response = response.header(header::CONTENT_TYPE, content_type);
    }
    response
        .body(Body::from(bytes))
        .map_err(|e| ServerError::Response(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::{
        Router,
        extract::RawQuery,
        http::{Request, StatusCode, Uri},
        routing::{get, post},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .route(
                "/api/v1/connect/wallet/transactions",
                get(|headers: HeaderMap, RawQuery(query): RawQuery| async move {
                    Json(json!({
                        "org": headers.get("x-organization-id").and_then(|v| v.to_str().ok()),
                        "auth": headers.get("authorization").and_then(|v| v.to_str().ok()),
                        "query": query,
                    }))
                }),
            )
            .route(
                "/api/v1/connect/echo/{*rest}",
                get(|uri: Uri| async move {
                    Json(json!({"path": uri.path(), "query": uri.query()}))
                }),
            )
            .route(
                "/api/v1/connect/withdrawals/request",
                post(|Json(body): Json<Value>| async move {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"error": format!("cannot withdraw {}", body["amount"])})),
                    )
                }),
            );

        serve(app).await
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn app(backend_url: String, static_dir: &std::path::Path) -> Router {
        crate::build_router(AppState::new(ServerConfig {
            backend_url,
            static_dir: static_dir.to_path_buf(),
            ..Default::default()
        }))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_headers_and_query() {
        let backend = spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();

        let response = app(backend, dir.path())
            .oneshot(
                Request::get("/api/v1/connect/wallet/transactions?limit=10")
                    .header("X-Organization-ID", "org-1")
                    .header("Authorization", "Bearer abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["org"], "org-1");
        assert_eq!(body["auth"], "Bearer abc");
        assert_eq!(body["query"], "limit=10");
    }

    #[tokio::test]
    async fn test_encoded_path_is_forwarded_verbatim() {
        let backend = spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();

        let response = app(backend, dir.path())
            .oneshot(
                Request::get("/api/v1/connect/echo/a%3Fb%2Fc?limit=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["path"], "/api/v1/connect/echo/a%3Fb%2Fc");
        assert_eq!(body["query"], "limit=5");
    }

    #[tokio::test]
    async fn test_backend_error_passes_through() {
        let backend = spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();

        let response = app(backend, dir.path())
            .oneshot(
                Request::post("/api/v1/connect/withdrawals/request")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"amount":75}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "cannot withdraw 75");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_bad_gateway() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let dir = tempfile::tempdir().unwrap();

        let response = app(format!("http://{addr}"), dir.path())
            .oneshot(Request::get("/api/v1/connect/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["code"], "BACKEND_UNAVAILABLE");
        assert!(body["error"].as_str().unwrap().starts_with("Backend unavailable"));
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let backend = spawn_backend().await;
        let dir = tempfile::tempdir().unwrap();

        let response = app(backend.clone(), dir.path())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend"], backend);
        assert_eq!(body["backend_connected"], true);
    }

    #[tokio::test]
    async fn test_unknown_paths_serve_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>console</html>").unwrap();

        let response = app("http://127.0.0.1:9".into(), dir.path())
            .oneshot(Request::get("/connect/complete").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"<html>console</html>");
    }

    #[tokio::test]
    async fn test_health_does_not_hang_on_silent_backend() {
        let silent = Router::new().route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                "late"
            }),
        );
        let backend = serve(silent).await;
        let dir = tempfile::tempdir().unwrap();

        let response = tokio::time::timeout(
            HEALTH_CHECK_TIMEOUT * 5,
            app(backend, dir.path()).oneshot(Request::get("/health").body(Body::empty()).unwrap()),
        )
        .await
        .expect("health check should finish within the check timeout")
        .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend_connected"], false);
    }
}
