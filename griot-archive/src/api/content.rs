//! Public content endpoints: submission, per-kind reads, cross-kind feeds,
//! contributor profiles, and report filing

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::ApiError;
use crate::db::{contributors, reader, reports, writer};
use crate::stats;
use crate::AppState;
use griot_common::content::{ContentKind, ContentStatus, KindDetails, NewContent};
use griot_common::db::models::{Contributor, Report};
use griot_common::{Error, UnifiedContent};

/// Query parameters for listing endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Request body for POST /content/:kind
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub title: String,
    pub description: String,
    pub region: String,
    /// Caller identity from the auth collaborator, trusted as-is
    #[serde(default)]
    pub contributor_id: Option<Uuid>,
    /// Kind-specific payload, validated against the kind in the path
    pub details: Value,
}

/// Request body for POST /content/report/:id
#[derive(Debug, Deserialize)]
pub struct FileReportRequest {
    pub reporter_id: Uuid,
    pub reason: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Contributor profile response
#[derive(Debug, serde::Serialize)]
pub struct ProfileResponse {
    pub contributor: Contributor,
    pub content: Vec<UnifiedContent>,
    pub stats: stats::ContributorStats,
}

fn parse_kind(kind: &str) -> Result<ContentKind, ApiError> {
    ContentKind::from_db_str(kind)
        .ok_or_else(|| ApiError(Error::NotFound(format!("unknown content kind '{}'", kind))))
}

/// POST /content/:kind
///
/// Submit a new artifact. Returns the generated id; the item starts in
/// status `pending` and is invisible to public reads until approved.
pub async fn submit_content(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<Value>, ApiError> {
    let kind = parse_kind(&kind)?;

    let base = NewContent {
        title: request.title,
        description: request.description,
        region: request.region,
        contributor_id: request.contributor_id,
    };
    let details = KindDetails::from_value(kind, request.details)?;

    let id = writer::create_content(&state.db, &base, &details).await?;
    Ok(Json(json!({ "id": id })))
}

/// GET /content/:kind?limit=
///
/// Approved-only listing, newest first.
pub async fn list_content(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UnifiedContent>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let limit = state.limits.clamp(query.limit);

    let items = reader::list_by_kind(&state.db, kind, ContentStatus::Approved, limit).await?;
    Ok(Json(items))
}

/// GET /content/:kind/featured?limit=
pub async fn list_featured(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UnifiedContent>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let limit = state.limits.clamp(query.limit);

    let items = reader::list_featured(&state.db, kind, limit).await?;
    Ok(Json(items))
}

/// GET /content/:kind/:id
pub async fn get_content(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<UnifiedContent>, ApiError> {
    let kind = parse_kind(&kind)?;
    let item = reader::get_by_id(&state.db, kind, id).await?;
    Ok(Json(item))
}

/// GET /content/recent?limit=
///
/// Cross-kind approved feed for the homepage.
pub async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UnifiedContent>>, ApiError> {
    let limit = state.limits.clamp(query.limit);
    let items = reader::list_recent(&state.db, limit).await?;
    Ok(Json(items))
}

/// GET /content/contributor/:id
///
/// Contributor profile: the contributor, their approved content merged
/// across kinds, and derived statistics/badges.
pub async fn contributor_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let contributor = contributors::get_contributor(&state.db, id).await?;
    let content =
        reader::list_by_contributor(&state.db, id, Some(ContentStatus::Approved)).await?;
    let stats = stats::compute(&contributor, &content);

    Ok(Json(ProfileResponse {
        contributor,
        content,
        stats,
    }))
}

/// POST /content/report/:id
///
/// File a report against existing content. 201 on success; the content's
/// own status is untouched.
pub async fn file_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FileReportRequest>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let report = reports::file_report(
        &state.db,
        id,
        request.reporter_id,
        &request.reason,
        request.details.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(report)))
}
