//! Prediction API router.
//!
//! Routes are nested under `/api/`. Every endpoint is public; the CORS
//! layer answers browser preflights with a wildcard origin and an
//! explicit request-header allow-list, since the service fronts a web
//! symptom checker.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::api::error::ApiError;
use crate::catalog::{self, CategoryInfo};
use crate::config::APP_VERSION;
use crate::engine::{CancelToken, Predictor};
use crate::history::{HistoryEntry, RunHistory};
use crate::models::Prediction;

// ═══════════════════════════════════════════════════════════
// Shared state
// ═══════════════════════════════════════════════════════════

/// Engine and history shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn Predictor>,
    pub history: Arc<Mutex<RunHistory>>,
}

impl AppState {
    pub fn new(engine: Arc<dyn Predictor>) -> Self {
        Self {
            engine,
            history: Arc::new(Mutex::new(RunHistory::new())),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Request / response types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    mode: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct CatalogResponse {
    categories: Vec<CategoryInfo>,
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    entries: Vec<HistoryEntry>,
}

// ═══════════════════════════════════════════════════════════
// Router
// ═══════════════════════════════════════════════════════════

/// Builds the service router with state and CORS attached.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/predict-disease", post(predict))
        .route("/api/catalog", get(catalog_view))
        .route("/api/history", get(history_view))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(cors_layer())
}

/// Wildcard-origin CORS with the request headers browsers send from
/// the web client. The layer also answers OPTIONS preflights.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

// ═══════════════════════════════════════════════════════════
// Handlers
// ═══════════════════════════════════════════════════════════

/// POST /api/predict-disease with body `{"symptoms": [..]}`.
///
/// Success returns the prediction object itself as the top-level JSON
/// body, no wrapper. Successful predictions are appended to history.
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let started = Instant::now();
    let cancel = CancelToken::new();
    let prediction = state.engine.predict(&request.symptoms, &cancel).await?;

    // Symptom labels are patient data and stay out of the log.
    tracing::info!(
        symptom_count = request.symptoms.len(),
        disease = %prediction.disease,
        confidence = prediction.confidence,
        severity = %prediction.severity,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "prediction served"
    );

    let mut history = state
        .history
        .lock()
        .map_err(|_| ApiError::Internal("history lock poisoned".into()))?;
    history.record(request.symptoms, prediction.clone());
    drop(history);

    Ok(Json(prediction))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mode: state.engine.mode().as_str(),
        version: APP_VERSION,
    })
}

async fn catalog_view() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        categories: catalog::catalog(),
    })
}

async fn history_view(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state
        .history
        .lock()
        .map_err(|_| ApiError::Internal("history lock poisoned".into()))?;
    Ok(Json(HistoryResponse {
        entries: history.recent(),
    }))
}
