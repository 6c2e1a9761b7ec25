//! Report sub-workflow
//!
//! Reports are independent complaint records against visible content:
//! `pending -> resolved | dismissed`. Resolving or dismissing a report never
//! touches the reported content's own status; removal of content found in
//! violation is a separate, explicit moderation action.

use griot_common::content::ReportStatus;
use griot_common::db::models::Report;
use griot_common::{ids, time, Error, Result};
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

/// File a report against existing content
///
/// 404 if the content id is unknown. The report starts `pending`; the
/// content row is not mutated.
pub async fn file_report(
    pool: &SqlitePool,
    content_id: Uuid,
    reporter_id: Uuid,
    reason: &str,
    details: Option<&str>,
) -> Result<Report> {
    if reason.trim().is_empty() {
        return Err(Error::Validation(
            "missing required field: reason".to_string(),
        ));
    }

    let content_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM content WHERE guid = ?)")
            .bind(content_id.to_string())
            .fetch_one(pool)
            .await?;
    if !content_exists {
        return Err(Error::NotFound(format!("content {}", content_id)));
    }

    let id = ids::generate();
    let now = time::now_ms();

    sqlx::query(
        r#"
        INSERT INTO reports (guid, content_id, reporter_id, reason, details,
                             status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 'pending', ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(content_id.to_string())
    .bind(reporter_id.to_string())
    .bind(reason)
    .bind(details)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    info!("Report {} filed against content {}", id, content_id);

    Ok(Report {
        id,
        content_id,
        reporter_id,
        reason: reason.to_string(),
        details: details.map(str::to_string),
        status: ReportStatus::Pending,
        created_at: time::from_unix_ms(now),
        updated_at: time::from_unix_ms(now),
    })
}

/// List reports, optionally filtered by status, newest first
pub async fn list_reports(
    pool: &SqlitePool,
    status: Option<ReportStatus>,
) -> Result<Vec<Report>> {
    let mut sql = String::from(
        "SELECT guid, content_id, reporter_id, reason, details, status, created_at, updated_at \
         FROM reports",
    );
    if status.is_some() {
        sql.push_str(" WHERE status = ?");
    }
    sql.push_str(" ORDER BY created_at DESC, guid ASC");

    let mut query = sqlx::query(&sql);
    if let Some(status) = status {
        query = query.bind(status.as_db_str());
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(report_from_row).collect()
}

/// Mark a pending report resolved (content found in violation)
pub async fn resolve_report(pool: &SqlitePool, id: Uuid) -> Result<()> {
    report_transition(pool, id, ReportStatus::Resolved).await
}

/// Mark a pending report dismissed (content unaffected)
pub async fn dismiss_report(pool: &SqlitePool, id: Uuid) -> Result<()> {
    report_transition(pool, id, ReportStatus::Dismissed).await
}

async fn report_transition(pool: &SqlitePool, id: Uuid, target: ReportStatus) -> Result<()> {
    let result = sqlx::query(
        "UPDATE reports SET status = ?, updated_at = ? WHERE guid = ? AND status = 'pending'",
    )
    .bind(target.as_db_str())
    .bind(time::now_ms())
    .bind(id.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM reports WHERE guid = ?")
                .bind(id.to_string())
                .fetch_optional(pool)
                .await?;

        return Err(match status {
            None => Error::NotFound(format!("report {}", id)),
            Some(actual) => Error::InvalidTransition(format!(
                "report {} is '{}'; {} requires 'pending'",
                id, actual, target
            )),
        });
    }

    info!("Report {} marked {}", id, target);
    Ok(())
}

fn report_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Report> {
    let guid: String = row.try_get("guid")?;
    let content_id: String = row.try_get("content_id")?;
    let reporter_id: String = row.try_get("reporter_id")?;
    let status_str: String = row.try_get("status")?;
    let created_at_ms: i64 = row.try_get("created_at")?;
    let updated_at_ms: i64 = row.try_get("updated_at")?;

    Ok(Report {
        id: ids::parse(&guid)
            .map_err(|e| Error::Integrity(format!("bad report guid '{}': {}", guid, e)))?,
        content_id: ids::parse(&content_id)
            .map_err(|e| Error::Integrity(format!("bad content guid '{}': {}", content_id, e)))?,
        reporter_id: ids::parse(&reporter_id)
            .map_err(|e| Error::Integrity(format!("bad reporter guid '{}': {}", reporter_id, e)))?,
        reason: row.try_get("reason")?,
        details: row.try_get("details")?,
        status: ReportStatus::from_db_str(&status_str)
            .ok_or_else(|| Error::Integrity(format!("unknown report status '{}'", status_str)))?,
        created_at: time::from_unix_ms(created_at_ms),
        updated_at: time::from_unix_ms(updated_at_ms),
    })
}
