// File: src/web/server.rs
use crate::constants::media;
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let upload_dir = state.config.upload_dir.clone();
    let public_dir = state.config.public_dir.clone();

    Router::new()
        // === PUBLISHING ROUTES ===
        .route("/api/schedule-post", post(handlers::schedule_post))
        .route("/api/post", post(handlers::publish_post))
        .route("/api/page-info", get(handlers::get_page_info))
        // === MONITORING ROUTES ===
        .route("/api/stats", get(handlers::get_stats))
        // === STORAGE ROUTES ===
        .route("/api/upload", post(handlers::upload_file))
        .route("/api/storage/quota", get(handlers::get_storage_quota))
        // === NOTIFICATION ROUTES ===
        .route("/api/test-notification", post(handlers::test_notification))
        // === STATIC FILES ===
        .nest_service("/temp-uploads", ServeDir::new(upload_dir))
        .fallback_service(ServeDir::new(public_dir))
        // Add middleware
        .layer(DefaultBodyLimit::max(media::MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
