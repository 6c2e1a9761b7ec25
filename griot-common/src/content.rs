//! Content domain model
//!
//! A content item is one base row in the `content` table plus exactly one row
//! in the extension table matching its kind. At the domain layer that pair is
//! a tagged union: common base fields wrapping a [`KindDetails`] variant, so
//! the cross-kind aggregator operates over one shape instead of four.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four fixed content kinds
///
/// The database stores the lowercase tag in `content.category`; the same tag
/// selects which extension table owns the kind-specific row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Stories,
    Proverbs,
    Art,
    Music,
}

impl ContentKind {
    /// Parse kind from its database tag / URL path segment
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "stories" => Some(ContentKind::Stories),
            "proverbs" => Some(ContentKind::Proverbs),
            "art" => Some(ContentKind::Art),
            "music" => Some(ContentKind::Music),
            _ => None,
        }
    }

    /// Canonical database tag (also the public API path segment)
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ContentKind::Stories => "stories",
            ContentKind::Proverbs => "proverbs",
            ContentKind::Art => "art",
            ContentKind::Music => "music",
        }
    }

    /// Name of the extension table holding this kind's one-to-one row
    pub fn extension_table(&self) -> &'static str {
        match self {
            ContentKind::Stories => "stories",
            ContentKind::Proverbs => "proverbs",
            ContentKind::Art => "artworks",
            ContentKind::Music => "music_tracks",
        }
    }

    /// All kinds, in feed-aggregation order
    pub fn all_variants() -> &'static [ContentKind] {
        &[
            ContentKind::Stories,
            ContentKind::Proverbs,
            ContentKind::Art,
            ContentKind::Music,
        ]
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

/// Moderation status of a content item
///
/// `pending` is the only non-terminal state. `removed` applies to content
/// retracted after publication; it is distinct from `rejected` (never
/// published) so moderation history stays legible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Pending,
    Approved,
    Rejected,
    Removed,
}

impl ContentStatus {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ContentStatus::Pending),
            "approved" => Some(ContentStatus::Approved),
            "rejected" => Some(ContentStatus::Rejected),
            "removed" => Some(ContentStatus::Removed),
            _ => None,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Approved => "approved",
            ContentStatus::Rejected => "rejected",
            ContentStatus::Removed => "removed",
        }
    }

    pub fn all_variants() -> &'static [ContentStatus] {
        &[
            ContentStatus::Pending,
            ContentStatus::Approved,
            ContentStatus::Rejected,
            ContentStatus::Removed,
        ]
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

/// Status of a report filed against published content
///
/// Independent lifecycle from the content's own status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReportStatus::Pending),
            "resolved" => Some(ReportStatus::Resolved),
            "dismissed" => Some(ReportStatus::Dismissed),
            _ => None,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

/// Story extension fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDetails {
    pub body: String,
    pub read_time: String,
    pub moral_lesson: String,
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Proverb extension fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProverbDetails {
    pub body: String,
    pub english_translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proverb_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// Art extension fields, including workshop booking details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtDetails {
    pub body: String,
    pub technique: String,
    pub medium: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_create: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub booking_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_price: Option<f64>,
}

/// Music extension fields; audio bytes live in external storage, only the
/// URL is kept here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub genre: String,
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Kind-specific payload, tagged by content kind
///
/// Serializes untagged (the surrounding [`UnifiedContent`] carries the
/// `content_type` tag); deserialization is always kind-directed through
/// [`KindDetails::from_value`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum KindDetails {
    Story(StoryDetails),
    Proverb(ProverbDetails),
    Art(ArtDetails),
    Music(MusicDetails),
}

impl KindDetails {
    /// Deserialize a payload as the given kind
    ///
    /// Shape mismatches surface as validation errors naming the kind, so the
    /// caller sees "bad input" rather than a serialization internal.
    pub fn from_value(kind: ContentKind, value: serde_json::Value) -> Result<Self> {
        let details = match kind {
            ContentKind::Stories => serde_json::from_value::<StoryDetails>(value)
                .map(KindDetails::Story),
            ContentKind::Proverbs => serde_json::from_value::<ProverbDetails>(value)
                .map(KindDetails::Proverb),
            ContentKind::Art => serde_json::from_value::<ArtDetails>(value)
                .map(KindDetails::Art),
            ContentKind::Music => serde_json::from_value::<MusicDetails>(value)
                .map(KindDetails::Music),
        };
        details.map_err(|e| Error::Validation(format!("invalid {} details: {}", kind, e)))
    }

    /// The kind this payload belongs to
    pub fn kind(&self) -> ContentKind {
        match self {
            KindDetails::Story(_) => ContentKind::Stories,
            KindDetails::Proverb(_) => ContentKind::Proverbs,
            KindDetails::Art(_) => ContentKind::Art,
            KindDetails::Music(_) => ContentKind::Music,
        }
    }
}

/// Base fields common to every submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub region: String,
    /// Supplied by the auth collaborator; trusted as-is
    #[serde(default)]
    pub contributor_id: Option<Uuid>,
}

/// Validate a submission against the common schema and the required-field
/// set for its kind
///
/// Returns a `Validation` error naming the first offending field. Nothing is
/// written before this passes.
pub fn validate(base: &NewContent, details: &KindDetails) -> Result<()> {
    require_non_empty("title", &base.title)?;
    require_non_empty("description", &base.description)?;
    require_non_empty("region", &base.region)?;

    match details {
        KindDetails::Story(story) => {
            require_non_empty("body", &story.body)?;
            require_non_empty("read_time", &story.read_time)?;
            require_non_empty("moral_lesson", &story.moral_lesson)?;
            require_non_empty("context", &story.context)?;
        }
        KindDetails::Proverb(proverb) => {
            require_non_empty("body", &proverb.body)?;
            require_non_empty("english_translation", &proverb.english_translation)?;
        }
        KindDetails::Art(art) => {
            require_non_empty("body", &art.body)?;
            require_non_empty("technique", &art.technique)?;
            require_non_empty("medium", &art.medium)?;
            if art.booking_available {
                match &art.booking_venue {
                    Some(venue) => require_non_empty("booking_venue", venue)?,
                    None => {
                        return Err(Error::Validation(
                            "missing required field: booking_venue".to_string(),
                        ))
                    }
                }
            }
        }
        KindDetails::Music(music) => {
            require_non_empty("genre", &music.genre)?;
            require_non_empty("audio_url", &music.audio_url)?;
        }
    }

    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!(
            "missing required field: {}",
            field
        )));
    }
    Ok(())
}

/// Contributor fields exposed alongside content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub region: String,
}

/// The normalized cross-kind shape every read path produces
///
/// One base record joined with its extension row and (when still present)
/// its contributor. `contributor` degrades to `None` if the contributor row
/// has vanished; the query never fails on that account.
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedContent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub region: String,
    pub content_type: ContentKind,
    pub status: ContentStatus,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub contributor: Option<ContributorSummary>,
    pub details: KindDetails,
}
