use axum::http::Method;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use postboard_api::{create_router, AppState, DbState, UploadStore};

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match &config.cors_origin {
        Some(origin) => cors.allow_origin(origin.clone()),
        None => cors.allow_origin(Any),
    }
}

/// API routes plus uploaded and public static files
pub fn build_app(config: &Config, state: AppState) -> Router {
    create_router(state)
        .nest_service(
            postboard_core::UPLOADS_ROUTE,
            ServeDir::new(&config.upload_dir),
        )
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Connect to the database and serve until Ctrl-C
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = DbState::init(&config.storage_config()).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let uploads = UploadStore::new(&config.upload_dir);

    let app = build_app(&config, AppState::new(db.clone(), uploads));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
