//! Contributor queries

use griot_common::db::models::{Contributor, NewContributor};
use griot_common::{ids, time, Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Fetch a contributor by id
pub async fn get_contributor(pool: &SqlitePool, id: Uuid) -> Result<Contributor> {
    let row = sqlx::query(
        r#"
        SELECT guid, first_name, last_name, email, region, bio, role, created_at
        FROM contributors
        WHERE guid = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("contributor {}", id)))?;

    let guid: String = row.try_get("guid")?;
    let created_at_ms: i64 = row.try_get("created_at")?;

    Ok(Contributor {
        id: ids::parse(&guid)
            .map_err(|e| Error::Integrity(format!("bad contributor guid '{}': {}", guid, e)))?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        region: row.try_get("region")?,
        bio: row.try_get("bio")?,
        role: row.try_get("role")?,
        created_at: time::from_unix_ms(created_at_ms),
    })
}

/// Register a contributor, returning the generated id
pub async fn create_contributor(pool: &SqlitePool, new: &NewContributor) -> Result<Uuid> {
    let id = ids::generate();

    sqlx::query(
        r#"
        INSERT INTO contributors (guid, first_name, last_name, email, region, bio, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?, 'contributor', ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.region)
    .bind(&new.bio)
    .bind(time::now_ms())
    .execute(pool)
    .await?;

    Ok(id)
}
