//! HTTP server for venue package matching

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    IntegratedMatchRequest, MatchError, MatchResponse, PopularityReport, SharedMatchService,
};

/// Inline documents to match without touching the backend
#[derive(Debug, Deserialize)]
pub struct MatchDocumentsHttp {
    pub requirements: Value,
    pub variants: Value,
}

#[derive(Debug, Deserialize)]
pub struct PopularityRequestHttp {
    pub variants: Value,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: MatchError) -> HandlerError {
    let (status, summary) = match &err {
        MatchError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
        MatchError::NoRequirements => (StatusCode::UNPROCESSABLE_ENTITY, "No valid user requirements"),
        MatchError::Upstream { .. } | MatchError::Http(_) | MatchError::Decode(_) => {
            (StatusCode::BAD_GATEWAY, "Upstream request failed")
        }
        MatchError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
    };

    if status.is_server_error() {
        error!("Match failed: {}", err);
    } else {
        warn!("Match rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: summary.to_string(),
            details: Some(err.to_string()),
        }),
    )
}

/// Integrated handler: fetch variants and requirements, then match
async fn match_integrated_handler(
    State(service): State<SharedMatchService>,
    Json(req): Json<IntegratedMatchRequest>,
) -> Result<Json<MatchResponse>, HandlerError> {
    info!("Received integrated match request: job_id={:?}", req.job_id);

    let response = service.match_integrated(req).await.map_err(error_response)?;
    info!(
        "Match successful: {} variants, {} venues",
        response.matched_variants,
        response.venue_matches.len()
    );
    Ok(Json(response))
}

async fn match_documents_handler(
    State(service): State<SharedMatchService>,
    Json(req): Json<MatchDocumentsHttp>,
) -> Result<Json<MatchResponse>, HandlerError> {
    service
        .match_documents(&req.requirements, &req.variants)
        .map(Json)
        .map_err(error_response)
}

async fn popularity_handler(
    State(service): State<SharedMatchService>,
    Json(req): Json<PopularityRequestHttp>,
) -> Json<PopularityReport> {
    let report = service.item_popularity(&req.variants);
    info!(
        "Popularity computed: {} items over {} variants",
        report.items.len(),
        report.total_variants
    );
    Json(report)
}

/// Health check handler
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "menumatch".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create and configure the HTTP router
pub fn create_router(service: SharedMatchService) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/match-restaurants-integrated", post(match_integrated_handler))
        .route("/api/match", post(match_documents_handler))
        .route("/api/item-popularity", post(popularity_handler))
        .with_state(service)
}

/// Run the HTTP server
pub async fn run_server(service: SharedMatchService, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting menumatch server on {}", addr);

    let app = create_router(service);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
