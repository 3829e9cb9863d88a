use crate::infra::{AppState, IdentificationService};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use mineral_id::error::AppError;
use mineral_id::identification::{
    FieldVocabulary, IdentificationSummary, Observation, ObservationInput, ReferenceRecord,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct IdentifyResponse {
    pub(crate) identified_at: DateTime<Utc>,
    pub(crate) observation: Observation,
    #[serde(flatten)]
    pub(crate) summary: IdentificationSummary,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogResponse {
    pub(crate) count: usize,
    pub(crate) records: Vec<ReferenceRecord>,
}

pub(crate) fn identification_router(service: Arc<IdentificationService>) -> Router {
    Router::new()
        .route("/api/v1/identify", post(identify_endpoint))
        .route("/api/v1/catalog", get(catalog_endpoint))
        .route("/api/v1/vocabulary", get(vocabulary_endpoint))
        .with_state(service)
}

pub(crate) fn with_service_routes(service: Arc<IdentificationService>) -> Router {
    identification_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn identify_endpoint(
    State(service): State<Arc<IdentificationService>>,
    Json(input): Json<ObservationInput>,
) -> Result<Json<IdentifyResponse>, AppError> {
    let observation = service.observe(&input)?;
    let summary = service.identify(&observation).summary();

    if let Some(best) = &summary.best_guess {
        info!(best_guess = %best.name, score_pct = best.score_pct, "identification served");
    }

    Ok(Json(IdentifyResponse {
        identified_at: Utc::now(),
        observation,
        summary,
    }))
}

pub(crate) async fn catalog_endpoint(
    State(service): State<Arc<IdentificationService>>,
) -> Json<CatalogResponse> {
    let records = service.catalog().records().to_vec();
    Json(CatalogResponse {
        count: records.len(),
        records,
    })
}

pub(crate) async fn vocabulary_endpoint(
    State(service): State<Arc<IdentificationService>>,
) -> Json<FieldVocabulary> {
    Json(service.vocabulary())
}
