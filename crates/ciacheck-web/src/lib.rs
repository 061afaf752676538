//! ciacheck Web Host
//!
//! Axum server for the analyzer page: a URL field, one button per category
//! and the results region, rendered server-side.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use ciacheck_core::AnalysisGateway;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::page::index))
        .route("/run/{category}", post(routes::page::run))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(gateway: Arc<dyn AnalysisGateway>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(AppState::new(gateway));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
