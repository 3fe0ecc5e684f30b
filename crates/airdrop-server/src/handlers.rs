//! HTTP request handlers for the airdrop endpoints.
//!
//! Implements ingestion, filtered listing, keyword search and health check
//! using axum.

use airdrop_classifier::{DiscoveryError, DiscoveryService};
use airdrop_domain::AirdropRecord;
use airdrop_store::SqliteStore;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Body returned when a field of the ingest request is missing
pub const MISSING_FIELD_MESSAGE: &str = "Missing required field: text, source, or link";

/// Body returned when the text does not classify as an airdrop
pub const NOT_AIRDROP_MESSAGE: &str =
    "Tweet was not recognized as an airdrop or didn't meet criteria";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Classification and storage service
    pub service: Arc<DiscoveryService<SqliteStore>>,
}

/// Ingest request
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Tweet text
    pub text: Option<String>,
    /// Provenance label
    pub source: Option<String>,
    /// Link to the original post
    pub link: Option<String>,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Keyword to look for in raw text
    pub keyword: Option<String>,
}

/// Record as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    /// Record identity
    pub id: Option<String>,
    /// Display title
    pub title: String,
    /// Provenance label
    pub source: String,
    /// Link to the original post
    pub link: String,
    /// Extracted task list
    pub tasks: Option<String>,
    /// Original text
    pub raw_text: String,
    /// Creation time (Unix seconds)
    pub created_at: u64,
}

impl From<AirdropRecord> for RecordResponse {
    fn from(record: AirdropRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_string()),
            title: record.title,
            source: record.source,
            link: record.link,
            tasks: record.tasks,
            raw_text: record.raw_text,
            created_at: record.created_at,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of stored records
    pub records: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request rejected before reaching the classifier
    BadRequest(String),
    /// Text did not classify as an airdrop
    NotAirdrop,
    /// Discovery service failure
    Discovery(DiscoveryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotAirdrop => (StatusCode::BAD_REQUEST, NOT_AIRDROP_MESSAGE.to_string()),
            AppError::Discovery(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<DiscoveryError> for AppError {
    fn from(e: DiscoveryError) -> Self {
        AppError::Discovery(e)
    }
}

/// POST /airdrops/ingest - Classify a tweet and store it if it is an airdrop
async fn ingest_tweet(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let (Some(text), Some(source), Some(link)) = (request.text, request.source, request.link)
    else {
        warn!("Missing required field in ingest request");
        return Err(AppError::BadRequest(MISSING_FIELD_MESSAGE.to_string()));
    };

    match state.service.process_tweet(&text, &source, &link)? {
        Some(record) => {
            info!("Successfully ingested and processed tweet: {}", record.title);
            Ok(Json(record.into()))
        }
        None => {
            info!("Tweet was not recognized as an airdrop or didn't meet criteria");
            Err(AppError::NotAirdrop)
        }
    }
}

/// GET /airdrops/filtered - Stored records matching the keyword rule
async fn filtered_airdrops(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecordResponse>>, AppError> {
    let airdrops = state.service.filtered_airdrops()?;
    info!("Returning {} filtered airdrop tweets", airdrops.len());
    Ok(Json(airdrops.into_iter().map(Into::into).collect()))
}

/// GET /airdrops/search?keyword=... - Stored records containing a keyword
async fn search_airdrops(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecordResponse>>, AppError> {
    let keyword = params
        .keyword
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Keyword is required".to_string()))?;

    let results = state.service.search_by_keyword(&keyword)?;
    info!("Found {} airdrops matching keyword: {}", results.len(), keyword);
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

/// GET /health - Liveness plus record count
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthCheckResponse>, AppError> {
    let records = state.service.record_count()?;
    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        records,
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/airdrops/ingest", post(ingest_tweet))
        .route("/airdrops/filtered", get(filtered_airdrops))
        .route("/airdrops/search", get(search_airdrops))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Router serving only the health check, used when discovery is disabled
pub fn create_health_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health_check))
        .with_state(state)
}
