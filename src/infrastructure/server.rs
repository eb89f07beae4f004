// Server module - router assembly and the serve loop used by main.rs

use axum::Router;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::infrastructure::AppState;
use crate::infrastructure::config::Config;

/// Build the full application router: API routes plus tracing and CORS layers
pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let mut origins = Vec::new();
    for origin in cors_allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => origins.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    api::api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the API until Ctrl-C or SIGTERM, then let in-flight requests finish
pub async fn run_server(config: &Config, state: AppState) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let app = build_router(state, &config.cors_allowed_origins);

    tracing::info!("🚀 Server ready at: http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
