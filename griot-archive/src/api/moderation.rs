//! Moderation endpoints: the content status state machine, the featured
//! toggle, the pending queue, and report handling
//!
//! These are trusted-caller routes; authentication lives in an external
//! collaborator that fronts this service.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::ApiError;
use crate::db::{moderation, reader, reports};
use crate::AppState;
use griot_common::content::ReportStatus;
use griot_common::db::models::Report;
use griot_common::{Error, UnifiedContent};

/// Request body for PUT /content/reject/:id
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// Free text shown to the contributor; persisted on the content row
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for PUT /content/feature/:id
#[derive(Debug, Deserialize)]
pub struct FeatureRequest {
    pub featured: bool,
}

/// Query parameters for GET /content/reports
#[derive(Debug, Deserialize)]
pub struct ReportsQuery {
    pub status: Option<String>,
}

/// GET /moderation/queue
///
/// Pending items across all kinds, merged into one feed. This is the only
/// read surface through which pending content is visible.
pub async fn moderation_queue(
    State(state): State<AppState>,
) -> Result<Json<Vec<UnifiedContent>>, ApiError> {
    let items = reader::list_pending(&state.db).await?;
    Ok(Json(items))
}

/// PUT /content/approve/:id - `pending -> approved`
pub async fn approve_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    moderation::approve(&state.db, id).await?;
    Ok(Json(json!({ "id": id, "status": "approved" })))
}

/// PUT /content/reject/:id - `pending -> rejected`
pub async fn reject_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<Value>, ApiError> {
    moderation::reject(&state.db, id, request.reason.as_deref()).await?;
    Ok(Json(json!({ "id": id, "status": "rejected" })))
}

/// PUT /content/remove/:id - `approved -> removed`
pub async fn remove_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    moderation::remove(&state.db, id).await?;
    Ok(Json(json!({ "id": id, "status": "removed" })))
}

/// PUT /content/feature/:id - toggle the featured flag
pub async fn feature_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FeatureRequest>,
) -> Result<Json<Value>, ApiError> {
    moderation::set_featured(&state.db, id, request.featured).await?;
    Ok(Json(json!({ "id": id, "featured": request.featured })))
}

/// GET /content/reports?status=
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<Vec<Report>>, ApiError> {
    let status = match query.status.as_deref() {
        Some(s) => Some(ReportStatus::from_db_str(s).ok_or_else(|| {
            ApiError(Error::Validation(format!("unknown report status '{}'", s)))
        })?),
        None => None,
    };

    let items = reports::list_reports(&state.db, status).await?;
    Ok(Json(items))
}

/// PUT /content/reports/resolve/:id - `pending -> resolved`
pub async fn resolve_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    reports::resolve_report(&state.db, id).await?;
    Ok(Json(json!({ "id": id, "status": "resolved" })))
}

/// PUT /content/reports/dismiss/:id - `pending -> dismissed`
pub async fn dismiss_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    reports::dismiss_report(&state.db, id).await?;
    Ok(Json(json!({ "id": id, "status": "dismissed" })))
}
