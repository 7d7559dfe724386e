//! connect-console HTTP Server
//!
//! Axum-based host for the testing console: serves the built WASM
//! frontend and forwards `/api/v1/connect/*` to the payments backend so
//! the browser only ever talks to one origin.

mod config;
mod error;
mod handlers;
mod state;

use axum::{
    Router,
    routing::{any, get},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::handlers::{check_backend, forward, health_check};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new(config.clone());

    // Verify backend connection
    if check_backend(&state).await {
        tracing::info!("✓ Connected to backend at {}", config.backend_url);
    } else {
        tracing::warn!("⚠ Backend not reachable at {}", config.backend_url);
        tracing::warn!("  API calls will answer 502 until it is up (set BACKEND_URL in .env)");
    }

    if !config.static_dir.join("index.html").exists() {
        tracing::warn!(
            "⚠ No index.html in {} - build the frontend with trunk first",
            config.static_dir.display()
        );
    }

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 connect-console running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  ANY  /api/v1/connect/*   - Forwarded to {}", config.backend_url);
    tracing::info!("  GET  /*                  - Console ({})", config.static_dir.display());
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes, static fallback and middleware
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Unknown paths fall back to index.html so /connect/refresh and
    // /connect/complete land in the console
    let static_dir = &state.config.static_dir;
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        // Health
        .route("/health", get(health_check))
        // Connect API
        .route("/api/v1/connect/{*path}", any(forward))
        // Static files (WASM frontend)
        .fallback_service(frontend)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
