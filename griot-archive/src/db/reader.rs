//! Content reader and cross-kind feed aggregator
//!
//! Single-kind queries join base + extension + contributor. The cross-kind
//! feeds fetch each kind independently (the four extension tables have
//! different shapes), normalize every row into [`UnifiedContent`], then
//! k-way merge the per-kind lists into one globally ordered feed.
//!
//! Feed ordering is `created_at DESC`, tie-broken by `guid ASC`, enforced
//! identically in the per-kind SQL and in the merge comparator so the feed
//! is deterministic. Concatenating the per-kind lists without the merge
//! would yield a feed sorted within each kind but not globally.

use std::cmp::Ordering;
use std::collections::VecDeque;

use griot_common::content::{
    ArtDetails, ContentKind, ContentStatus, ContributorSummary, KindDetails, MusicDetails,
    ProverbDetails, StoryDetails, UnifiedContent,
};
use griot_common::{ids, time, Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::error;
use uuid::Uuid;

/// List approved-or-other-status content of one kind, newest first
pub async fn list_by_kind(
    pool: &SqlitePool,
    kind: ContentKind,
    status: ContentStatus,
    limit: i64,
) -> Result<Vec<UnifiedContent>> {
    let sql = format!(
        r#"
        SELECT {base_cols}, {ext_cols}, {contributor_cols}
        FROM content c
        JOIN {ext_table} x ON x.content_id = c.guid
        LEFT JOIN contributors u ON u.guid = c.contributor_id
        WHERE c.category = ? AND c.status = ?
        ORDER BY c.created_at DESC, c.guid ASC
        LIMIT ?
        "#,
        base_cols = BASE_COLUMNS,
        ext_cols = extension_columns(kind),
        contributor_cols = CONTRIBUTOR_COLUMNS,
        ext_table = kind.extension_table(),
    );

    let rows = sqlx::query(&sql)
        .bind(kind.as_db_str())
        .bind(status.as_db_str())
        .bind(limit)
        .fetch_all(pool)
        .await?;

    rows.iter().map(|row| unified_from_row(kind, row)).collect()
}

/// List approved, featured content of one kind
pub async fn list_featured(
    pool: &SqlitePool,
    kind: ContentKind,
    limit: i64,
) -> Result<Vec<UnifiedContent>> {
    let sql = format!(
        r#"
        SELECT {base_cols}, {ext_cols}, {contributor_cols}
        FROM content c
        JOIN {ext_table} x ON x.content_id = c.guid
        LEFT JOIN contributors u ON u.guid = c.contributor_id
        WHERE c.category = ? AND c.status = 'approved' AND c.is_featured = 1
        ORDER BY c.created_at DESC, c.guid ASC
        LIMIT ?
        "#,
        base_cols = BASE_COLUMNS,
        ext_cols = extension_columns(kind),
        contributor_cols = CONTRIBUTOR_COLUMNS,
        ext_table = kind.extension_table(),
    );

    let rows = sqlx::query(&sql)
        .bind(kind.as_db_str())
        .bind(limit)
        .fetch_all(pool)
        .await?;

    rows.iter().map(|row| unified_from_row(kind, row)).collect()
}

/// Fetch one content item by kind and id
///
/// Distinguishes truly-absent rows (NotFound) from a base row whose
/// extension row is missing: the latter is corrupt state, logged as a
/// server-side integrity fault and surfaced as an internal error rather
/// than an ordinary 404.
pub async fn get_by_id(pool: &SqlitePool, kind: ContentKind, id: Uuid) -> Result<UnifiedContent> {
    let sql = format!(
        r#"
        SELECT {base_cols}, {ext_cols}, {contributor_cols}
        FROM content c
        JOIN {ext_table} x ON x.content_id = c.guid
        LEFT JOIN contributors u ON u.guid = c.contributor_id
        WHERE c.guid = ? AND c.category = ?
        "#,
        base_cols = BASE_COLUMNS,
        ext_cols = extension_columns(kind),
        contributor_cols = CONTRIBUTOR_COLUMNS,
        ext_table = kind.extension_table(),
    );

    let row = sqlx::query(&sql)
        .bind(id.to_string())
        .bind(kind.as_db_str())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => unified_from_row(kind, &row),
        None => {
            // Probe: does the base row exist for this kind without its
            // extension row?
            let base_exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM content WHERE guid = ? AND category = ?)",
            )
            .bind(id.to_string())
            .bind(kind.as_db_str())
            .fetch_one(pool)
            .await?;

            if base_exists {
                error!(
                    "Integrity fault: content {} ({}) has no row in {}",
                    id,
                    kind,
                    kind.extension_table()
                );
                Err(Error::Integrity(format!(
                    "content {} is missing its {} extension row",
                    id, kind
                )))
            } else {
                Err(Error::NotFound(format!("{} content {}", kind, id)))
            }
        }
    }
}

/// All content by one contributor across the four kinds, merged into a
/// single feed ordered by recency
///
/// `status` of `None` returns every status (moderation view); public callers
/// pass `Some(Approved)`.
pub async fn list_by_contributor(
    pool: &SqlitePool,
    contributor_id: Uuid,
    status: Option<ContentStatus>,
) -> Result<Vec<UnifiedContent>> {
    let mut per_kind = Vec::with_capacity(ContentKind::all_variants().len());

    for kind in ContentKind::all_variants() {
        let mut sql = format!(
            r#"
            SELECT {base_cols}, {ext_cols}, {contributor_cols}
            FROM content c
            JOIN {ext_table} x ON x.content_id = c.guid
            LEFT JOIN contributors u ON u.guid = c.contributor_id
            WHERE c.category = ? AND c.contributor_id = ?
            "#,
            base_cols = BASE_COLUMNS,
            ext_cols = extension_columns(*kind),
            contributor_cols = CONTRIBUTOR_COLUMNS,
            ext_table = kind.extension_table(),
        );
        if status.is_some() {
            sql.push_str(" AND c.status = ?");
        }
        sql.push_str(" ORDER BY c.created_at DESC, c.guid ASC");

        let mut query = sqlx::query(&sql)
            .bind(kind.as_db_str())
            .bind(contributor_id.to_string());
        if let Some(status) = status {
            query = query.bind(status.as_db_str());
        }

        let rows = query.fetch_all(pool).await?;
        let items: Result<Vec<UnifiedContent>> =
            rows.iter().map(|row| unified_from_row(*kind, row)).collect();
        per_kind.push(items?);
    }

    Ok(merge_feeds(per_kind))
}

/// Cross-kind approved feed, newest first (homepage)
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<UnifiedContent>> {
    let mut per_kind = Vec::with_capacity(ContentKind::all_variants().len());
    for kind in ContentKind::all_variants() {
        per_kind.push(list_by_kind(pool, *kind, ContentStatus::Approved, limit).await?);
    }

    let mut merged = merge_feeds(per_kind);
    merged.truncate(limit as usize);
    Ok(merged)
}

/// Cross-kind pending feed for the moderation queue
///
/// The only read path through which pending content is visible.
pub async fn list_pending(pool: &SqlitePool) -> Result<Vec<UnifiedContent>> {
    let mut per_kind = Vec::with_capacity(ContentKind::all_variants().len());
    for kind in ContentKind::all_variants() {
        per_kind.push(list_by_kind(pool, *kind, ContentStatus::Pending, i64::MAX).await?);
    }
    Ok(merge_feeds(per_kind))
}

/// Feed comparator: `created_at DESC`, then `id ASC`
pub fn feed_ordering(a: &UnifiedContent, b: &UnifiedContent) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// K-way merge of per-kind lists, each already ordered by [`feed_ordering`]
pub fn merge_feeds(lists: Vec<Vec<UnifiedContent>>) -> Vec<UnifiedContent> {
    let total: usize = lists.iter().map(Vec::len).sum();
    let mut queues: Vec<VecDeque<UnifiedContent>> =
        lists.into_iter().map(VecDeque::from).collect();
    let mut merged = Vec::with_capacity(total);

    loop {
        // Pick the head that sorts first across all queues
        let mut best: Option<(usize, chrono::DateTime<chrono::Utc>, Uuid)> = None;
        for (i, queue) in queues.iter().enumerate() {
            if let Some(item) = queue.front() {
                let replace = match best {
                    Some((_, ts, id)) => {
                        item.created_at > ts || (item.created_at == ts && item.id < id)
                    }
                    None => true,
                };
                if replace {
                    best = Some((i, item.created_at, item.id));
                }
            }
        }

        let Some((winner, _, _)) = best else { break };
        if let Some(item) = queues[winner].pop_front() {
            merged.push(item);
        }
    }

    merged
}

const BASE_COLUMNS: &str = "c.guid, c.title, c.description, c.region, c.is_featured, \
                            c.status, c.rejection_reason, c.created_at, c.updated_at";

const CONTRIBUTOR_COLUMNS: &str = "u.guid AS contributor_guid, \
                                   u.first_name AS contributor_first_name, \
                                   u.last_name AS contributor_last_name, \
                                   u.region AS contributor_region";

/// Extension-table columns for one kind, aliased into the shared row shape
fn extension_columns(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Stories => {
            "x.body, x.read_time, x.moral_lesson, x.context, x.difficulty, x.cover_image"
        }
        ContentKind::Proverbs => "x.body, x.english_translation, x.proverb_category, x.difficulty",
        ContentKind::Art => {
            "x.body, x.technique, x.medium, x.time_to_create, x.difficulty, \
             x.booking_available, x.booking_venue, x.booking_price"
        }
        ContentKind::Music => "x.body, x.genre, x.audio_url, x.tags, x.tempo, x.cover_image",
    }
}

/// Map one joined row into the normalized cross-kind shape
fn unified_from_row(kind: ContentKind, row: &SqliteRow) -> Result<UnifiedContent> {
    let guid: String = row.try_get("guid")?;
    let id = ids::parse(&guid)
        .map_err(|e| Error::Integrity(format!("bad content guid '{}': {}", guid, e)))?;

    let status_str: String = row.try_get("status")?;
    let status = ContentStatus::from_db_str(&status_str)
        .ok_or_else(|| Error::Integrity(format!("unknown content status '{}'", status_str)))?;

    let created_at_ms: i64 = row.try_get("created_at")?;
    let updated_at_ms: i64 = row.try_get("updated_at")?;
    let is_featured: i64 = row.try_get("is_featured")?;

    // Deleted contributor degrades to None; the row still serves
    let contributor = match row.try_get::<Option<String>, _>("contributor_guid")? {
        Some(contributor_guid) => Some(ContributorSummary {
            id: ids::parse(&contributor_guid).map_err(|e| {
                Error::Integrity(format!("bad contributor guid '{}': {}", contributor_guid, e))
            })?,
            first_name: row.try_get("contributor_first_name")?,
            last_name: row.try_get("contributor_last_name")?,
            region: row.try_get("contributor_region")?,
        }),
        None => None,
    };

    let details = details_from_row(kind, row)?;

    Ok(UnifiedContent {
        id,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        region: row.try_get("region")?,
        content_type: kind,
        status,
        is_featured: is_featured != 0,
        rejection_reason: row.try_get("rejection_reason")?,
        created_at: time::from_unix_ms(created_at_ms),
        updated_at: time::from_unix_ms(updated_at_ms),
        contributor,
        details,
    })
}

fn details_from_row(kind: ContentKind, row: &SqliteRow) -> Result<KindDetails> {
    let details = match kind {
        ContentKind::Stories => KindDetails::Story(StoryDetails {
            body: row.try_get("body")?,
            read_time: row.try_get("read_time")?,
            moral_lesson: row.try_get("moral_lesson")?,
            context: row.try_get("context")?,
            difficulty: row.try_get("difficulty")?,
            cover_image: row.try_get("cover_image")?,
        }),
        ContentKind::Proverbs => KindDetails::Proverb(ProverbDetails {
            body: row.try_get("body")?,
            english_translation: row.try_get("english_translation")?,
            proverb_category: row.try_get("proverb_category")?,
            difficulty: row.try_get("difficulty")?,
        }),
        ContentKind::Art => {
            let booking_available: i64 = row.try_get("booking_available")?;
            KindDetails::Art(ArtDetails {
                body: row.try_get("body")?,
                technique: row.try_get("technique")?,
                medium: row.try_get("medium")?,
                time_to_create: row.try_get("time_to_create")?,
                difficulty: row.try_get("difficulty")?,
                booking_available: booking_available != 0,
                booking_venue: row.try_get("booking_venue")?,
                booking_price: row.try_get("booking_price")?,
            })
        }
        ContentKind::Music => {
            let tags_json: Option<String> = row.try_get("tags")?;
            let tags = match tags_json {
                Some(json) => Some(serde_json::from_str(&json).map_err(|e| {
                    Error::Integrity(format!("bad tags JSON for music row: {}", e))
                })?),
                None => None,
            };
            KindDetails::Music(MusicDetails {
                body: row.try_get("body")?,
                genre: row.try_get("genre")?,
                audio_url: row.try_get("audio_url")?,
                tags,
                tempo: row.try_get("tempo")?,
                cover_image: row.try_get("cover_image")?,
            })
        }
    };

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use griot_common::content::{ContentKind, ContentStatus, ProverbDetails, StoryDetails};

    fn item(kind: ContentKind, created_at_s: i64, id_byte: u8) -> UnifiedContent {
        let details = match kind {
            ContentKind::Stories => KindDetails::Story(StoryDetails {
                body: "body".into(),
                read_time: "5 min".into(),
                moral_lesson: "lesson".into(),
                context: "context".into(),
                difficulty: None,
                cover_image: None,
            }),
            _ => KindDetails::Proverb(ProverbDetails {
                body: "body".into(),
                english_translation: "translation".into(),
                proverb_category: None,
                difficulty: None,
            }),
        };
        UnifiedContent {
            id: Uuid::from_bytes([id_byte; 16]),
            title: "t".into(),
            description: "d".into(),
            region: "r".into(),
            content_type: kind,
            status: ContentStatus::Approved,
            is_featured: false,
            rejection_reason: None,
            created_at: Utc.timestamp_opt(created_at_s, 0).unwrap(),
            updated_at: Utc.timestamp_opt(created_at_s, 0).unwrap(),
            contributor: None,
            details,
        }
    }

    #[test]
    fn test_merge_interleaved_timestamps() {
        // 1 story at T3, 2 proverbs at T1/T4, 1 music at T2
        let stories = vec![item(ContentKind::Stories, 3, 1)];
        let proverbs = vec![
            item(ContentKind::Proverbs, 4, 2),
            item(ContentKind::Proverbs, 1, 3),
        ];
        let art = vec![];
        let music = vec![item(ContentKind::Music, 2, 4)];

        let merged = merge_feeds(vec![stories, proverbs, art, music]);

        let times: Vec<i64> = merged.iter().map(|c| c.created_at.timestamp()).collect();
        assert_eq!(times, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_merge_is_globally_sorted_not_just_within_kind() {
        // Per-kind lists are each sorted, but naive concatenation of them
        // would interleave incorrectly
        let a = vec![
            item(ContentKind::Stories, 10, 1),
            item(ContentKind::Stories, 2, 2),
        ];
        let b = vec![
            item(ContentKind::Music, 9, 3),
            item(ContentKind::Music, 5, 4),
        ];

        let merged = merge_feeds(vec![a, b]);
        let times: Vec<i64> = merged.iter().map(|c| c.created_at.timestamp()).collect();
        assert_eq!(times, vec![10, 9, 5, 2]);
    }

    #[test]
    fn test_merge_tie_break_by_id_ascending() {
        let first = item(ContentKind::Stories, 7, 9);
        let second = item(ContentKind::Music, 7, 1);

        let merged = merge_feeds(vec![vec![first], vec![second]]);
        // Equal timestamps: lower id wins
        assert_eq!(merged[0].id, Uuid::from_bytes([1; 16]));
        assert_eq!(merged[1].id, Uuid::from_bytes([9; 16]));
    }

    #[test]
    fn test_merge_empty_lists() {
        let merged = merge_feeds(vec![vec![], vec![], vec![], vec![]]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_feed_ordering_comparator() {
        let newer = item(ContentKind::Stories, 10, 1);
        let older = item(ContentKind::Stories, 5, 2);
        assert_eq!(feed_ordering(&newer, &older), Ordering::Less);
        assert_eq!(feed_ordering(&older, &newer), Ordering::Greater);
        assert_eq!(feed_ordering(&newer, &newer), Ordering::Equal);
    }
}
