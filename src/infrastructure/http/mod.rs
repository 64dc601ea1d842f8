pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{feed::FeedController, health};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Build the application router
pub fn build_router(pool: Arc<DbPool>, feed_controller: Arc<FeedController>) -> Router {
    // Feed routes
    let feed_routes = Router::new()
        .route(
            "/api/feeds",
            post(FeedController::create_feed).get(FeedController::list_feeds),
        )
        .route("/api/feeds/:feedId/fetch", post(FeedController::fetch_feed))
        .route("/api/feeds/:feedId/posts", get(FeedController::list_posts))
        .with_state(feed_controller);

    // The trace span reads the request id, so the id middleware must run first
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(feed_routes)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0.as_str())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id
            )
        }))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    pool: Arc<DbPool>,
    feed_controller: Arc<FeedController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, feed_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
