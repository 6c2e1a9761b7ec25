//! Database models

use crate::content::ReportStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered contributor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to register a contributor
#[derive(Debug, Clone, Deserialize)]
pub struct NewContributor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub region: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// A complaint filed against already-visible content
///
/// Lifecycle is independent of the content's own moderation status.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub content_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
