//! griot-archive library - Cultural-heritage content archive service
//!
//! Contributors submit typed artifacts (stories, proverbs, art, music),
//! moderators govern their pending/approved/rejected lifecycle, and the
//! public reads approved content through per-kind and cross-kind feeds.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod stats;

use db::settings::ListingLimits;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Listing limits loaded from the settings table at startup
    pub limits: ListingLimits,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, limits: ListingLimits) -> Self {
        Self { db, limits }
    }
}

/// Build application router
///
/// Public read endpoints serve approved content only; moderation endpoints
/// are trusted-caller (authentication is an external collaborator).
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        // Public content surface
        .route("/content/recent", get(api::content::list_recent))
        .route("/content/contributor/:id", get(api::content::contributor_profile))
        .route("/content/report/:id", post(api::content::file_report))
        .route(
            "/content/:kind",
            get(api::content::list_content).post(api::content::submit_content),
        )
        .route("/content/:kind/featured", get(api::content::list_featured))
        .route("/content/:kind/:id", get(api::content::get_content))
        // Moderation surface
        .route("/moderation/queue", get(api::moderation::moderation_queue))
        .route("/content/approve/:id", put(api::moderation::approve_content))
        .route("/content/reject/:id", put(api::moderation::reject_content))
        .route("/content/remove/:id", put(api::moderation::remove_content))
        .route("/content/feature/:id", put(api::moderation::feature_content))
        .route("/content/reports", get(api::moderation::list_reports))
        .route("/content/reports/resolve/:id", put(api::moderation::resolve_report))
        .route("/content/reports/dismiss/:id", put(api::moderation::dismiss_report))
        .merge(api::health::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
