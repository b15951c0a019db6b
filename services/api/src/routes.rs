use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shipment_dossier::error::AppError;
use shipment_dossier::validation::{
    check_banking, BankingCheck, DossierOutcome, FieldMap, FieldRegistry, ShipmentDossier,
    ValidationReport,
};
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentValidationRequest {
    pub(crate) source: FieldMap,
    pub(crate) target: FieldMap,
    pub(crate) document_type: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DossierValidationResponse {
    pub(crate) generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub(crate) outcome: DossierOutcome,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dossiers/validate", post(validate_dossier_endpoint))
        .route("/api/v1/documents/validate", post(validate_document_endpoint))
        .route("/api/v1/banking/check", post(banking_check_endpoint))
        .route("/api/v1/profiles", get(profiles_endpoint))
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

pub(crate) async fn validate_dossier_endpoint(
    Extension(state): Extension<AppState>,
    Json(dossier): Json<ShipmentDossier>,
) -> Result<Json<DossierValidationResponse>, AppError> {
    let outcome = state.engine.validate_dossier(&dossier)?;
    info!(
        documents = outcome.reports.len(),
        issues = outcome.issues().len(),
        "dossier validated"
    );

    Ok(Json(DossierValidationResponse {
        generated_at: Utc::now(),
        outcome,
    }))
}

pub(crate) async fn validate_document_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DocumentValidationRequest>,
) -> Json<ValidationReport> {
    let DocumentValidationRequest {
        source,
        target,
        document_type,
    } = payload;

    Json(state.engine.validate(&source, &target, &document_type))
}

pub(crate) async fn banking_check_endpoint(Json(source): Json<FieldMap>) -> Json<BankingCheck> {
    Json(check_banking(&source))
}

pub(crate) async fn profiles_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<FieldRegistry> {
    Json(state.engine.registry().clone())
}
