//! Moderation workflow - the content status state machine
//!
//! `pending -> approved | rejected` and `approved -> removed`. Terminal
//! states are never re-enterable; repeat approval is a deterministic
//! InvalidTransition error so two racing moderators learn the item was
//! already decided.
//!
//! Each transition is one conditional UPDATE guarded by the expected current
//! status (optimistic check). Zero rows affected triggers a follow-up probe
//! to distinguish a missing row (NotFound) from a wrong-state row
//! (InvalidTransition).

use griot_common::content::ContentStatus;
use griot_common::{time, Error, Result};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Approve pending content, making it publicly visible
pub async fn approve(pool: &SqlitePool, id: Uuid) -> Result<()> {
    transition(
        pool,
        id,
        ContentStatus::Pending,
        ContentStatus::Approved,
        None,
    )
    .await
}

/// Reject pending content, persisting the moderator's reason
pub async fn reject(pool: &SqlitePool, id: Uuid, reason: Option<&str>) -> Result<()> {
    transition(
        pool,
        id,
        ContentStatus::Pending,
        ContentStatus::Rejected,
        reason,
    )
    .await
}

/// Retract previously-approved content
///
/// Removal is a fourth terminal status, not a hard delete: reports keep
/// their referenced row and moderation history stays intact, while every
/// public read path (which filters on `approved`) hides the item.
pub async fn remove(pool: &SqlitePool, id: Uuid) -> Result<()> {
    transition(
        pool,
        id,
        ContentStatus::Approved,
        ContentStatus::Removed,
        None,
    )
    .await
}

/// Toggle the featured flag, independent of status
pub async fn set_featured(pool: &SqlitePool, id: Uuid, featured: bool) -> Result<()> {
    let result = sqlx::query("UPDATE content SET is_featured = ?, updated_at = ? WHERE guid = ?")
        .bind(featured as i64)
        .bind(time::now_ms())
        .bind(id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("content {}", id)));
    }

    info!("Content {} featured flag set to {}", id, featured);
    Ok(())
}

async fn transition(
    pool: &SqlitePool,
    id: Uuid,
    expected: ContentStatus,
    target: ContentStatus,
    rejection_reason: Option<&str>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE content
        SET status = ?, rejection_reason = COALESCE(?, rejection_reason), updated_at = ?
        WHERE guid = ? AND status = ?
        "#,
    )
    .bind(target.as_db_str())
    .bind(rejection_reason)
    .bind(time::now_ms())
    .bind(id.to_string())
    .bind(expected.as_db_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(transition_failure(pool, id, expected, target).await?);
    }

    info!("Content {} transitioned {} -> {}", id, expected, target);
    Ok(())
}

/// Probe the actual status to decide whether the failed conditional update
/// was a missing row or an illegal transition
async fn transition_failure(
    pool: &SqlitePool,
    id: Uuid,
    expected: ContentStatus,
    target: ContentStatus,
) -> Result<Error> {
    let status: Option<String> = sqlx::query_scalar("SELECT status FROM content WHERE guid = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(match status {
        None => Error::NotFound(format!("content {}", id)),
        Some(actual) => Error::InvalidTransition(format!(
            "content {} is '{}'; {} requires '{}'",
            id, actual, target, expected
        )),
    })
}
