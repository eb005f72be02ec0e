//! Axum server setup and router configuration.

use crate::api;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Build the main application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Panel (identity-token) and reader (shared-secret) surfaces
        .nest("/config", api::panel::router().merge(api::reader::router()))
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Simple health check - returns OK if the server is running.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run the server with graceful shutdown support.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::{AuthConfig, SharedConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use rcfg_core::auth::StaticVerifier;
    use rcfg_core::gateway::ConfigGateway;
    use rcfg_sdk::API_TOKEN_HEADER;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    // A lazy pool never connects, so these tests only exercise routing and
    // the auth extractors, which run before any store access.
    fn test_router() -> Router {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        let config = SharedConfig {
            auth: Arc::new(RwLock::new(AuthConfig {
                api_token: "reader-secret".to_string(),
                identity_verify_url: "https://id.example.com/v1/verify".parse().unwrap(),
                identity_timeout: Duration::from_secs(5),
            })),
        };
        let state = AppState::new(
            ConfigGateway::new(pool),
            config,
            Arc::new(StaticVerifier::new("valid-token", "admin@example.com")),
        );
        build_router(state)
    }

    #[tokio::test]
    async fn test_health_is_unauthenticated() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_panel_routes_reject_missing_and_invalid_tokens() {
        let no_token = Request::builder()
            .uri("/config/all")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(no_token).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bad_token = Request::builder()
            .uri("/config/all")
            .header(header::AUTHORIZATION, "Bearer wrong-token")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(bad_token).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // A non-bearer authorization header is treated as missing.
        let not_bearer = Request::builder()
            .uri("/config/all")
            .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(not_bearer).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reader_route_requires_shared_secret() {
        let no_token = Request::builder()
            .uri("/config")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(no_token).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bad_token = Request::builder()
            .uri("/config?country=FR")
            .header(API_TOKEN_HEADER, "wrong-secret")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(bad_token).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mutation_routes_are_mounted() {
        // Auth runs only after routing succeeds, so a 401 here proves the
        // route exists (an unknown path would 404).
        for (method, uri) in [
            ("POST", "/config/add_config"),
            ("PUT", "/config/update/timeout_ms"),
            ("PUT", "/config/update/timeout_ms/country/FR"),
            ("DELETE", "/config/delete/timeout_ms/country/FR"),
            ("DELETE", "/config/delete/timeout_ms"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = test_router().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        }

        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/config/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
