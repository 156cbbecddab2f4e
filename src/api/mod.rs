pub mod handlers;
pub mod models;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::config::ServerConfig;
use crate::detector::Detector;
use handlers::{classify_handler, features_handler, health_handler, StartedAt};

/// Registers the API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/classify", web::post().to(classify_handler))
        .route("/features", web::post().to(features_handler))
        .route("/health", web::get().to(health_handler));
}

/// Starts the HTTP API and runs until shutdown
///
/// The detector is loaded once by the caller and shared read-only by every
/// worker.
pub async fn start_server(config: &ServerConfig, detector: Detector) -> Result<()> {
    let detector = web::Data::new(detector);
    let started_at = web::Data::new(StartedAt(Utc::now()));

    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(detector.clone())
            .app_data(started_at.clone())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("Server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}
