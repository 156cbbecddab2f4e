use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use crate::api::models::{ClassifyRequest, ClassifyResponse, ErrorResponse, HealthStatus};
use crate::detector::{error_message, Detector};
use crate::features::FEATURE_COLUMNS;

/// Shown when the request carries no URL at all
pub const EMPTY_URL_WARNING: &str = "Please enter a valid URL.";

/// Server start time, shared with the health handler
#[derive(Debug, Clone, Copy)]
pub struct StartedAt(pub DateTime<Utc>);

/// HTTP handler for classification requests
///
/// Runs the assessment on a blocking worker and renders any failure as one
/// generic error message.
///
/// # Arguments
/// * `request` - JSON request containing the URL to classify
/// * `detector` - Shared feature extractor and model
///
/// # Returns
/// * 200 with the verdict, 400 for a blank URL, 422 if processing fails
#[instrument(skip(detector))]
pub async fn classify_handler(
    request: web::Json<ClassifyRequest>,
    detector: web::Data<Detector>,
) -> impl Responder {
    info!("Received classify request for URL: {}", request.url);

    if request.url.is_empty() {
        warn!("Rejected classify request without a URL");
        return HttpResponse::BadRequest().json(ErrorResponse::warning(EMPTY_URL_WARNING));
    }

    let url = request.into_inner().url;
    let worker_detector = detector.clone();
    let worker_url = url.clone();
    let result = tokio::task::spawn_blocking(move || worker_detector.assess(&worker_url)).await;

    match result {
        Ok(Ok(assessment)) => {
            debug!("Classification completed for {}", url);
            let message = assessment.message();
            HttpResponse::Ok().json(ClassifyResponse {
                status: "success".to_string(),
                url,
                verdict: assessment.verdict,
                label: assessment.verdict.label(),
                confidence: assessment.confidence,
                message,
                features: assessment.features,
            })
        }
        Ok(Err(e)) => {
            warn!("Failed to process URL '{}': {}", url, e);
            HttpResponse::UnprocessableEntity().json(ErrorResponse::error(error_message(&e)))
        }
        Err(e) => {
            error!("Classification worker failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::error(format!("Error processing the URL: {}", e)))
        }
    }
}

/// HTTP handler returning the raw feature vector of a URL
#[instrument(skip(detector))]
pub async fn features_handler(
    request: web::Json<ClassifyRequest>,
    detector: web::Data<Detector>,
) -> impl Responder {
    debug!("Received features request for URL: {}", request.url);

    let url = request.into_inner().url;
    let worker_detector = detector.clone();
    let worker_url = url.clone();
    let result = tokio::task::spawn_blocking(move || worker_detector.features(&worker_url)).await;

    match result {
        Ok(Ok(features)) => HttpResponse::Ok().json(features),
        Ok(Err(e)) => {
            warn!("Failed to extract features from '{}': {}", url, e);
            HttpResponse::UnprocessableEntity().json(ErrorResponse::error(error_message(&e)))
        }
        Err(e) => {
            error!("Feature extraction worker failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::error(format!("Error processing the URL: {}", e)))
        }
    }
}

/// Health check endpoint
pub async fn health_handler(started_at: web::Data<StartedAt>) -> impl Responder {
    let started_at = started_at.0;
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        started_at,
        uptime_secs: (Utc::now() - started_at).num_seconds(),
        feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
    })
}
