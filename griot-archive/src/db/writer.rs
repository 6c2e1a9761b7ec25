//! Content writer - atomic two-table inserts
//!
//! A submission is one base row in `content` plus one row in the extension
//! table matching its kind. Both inserts run inside a single transaction so
//! readers can never observe a base row without its extension row: if the
//! extension insert fails, the transaction rolls back and nothing is visible.

use griot_common::content::{self, KindDetails, NewContent};
use griot_common::{ids, time, Error, Result};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Create a content item of the given kind
///
/// Validation runs before any write; failures name the offending field and
/// leave the database untouched. New records always start in status
/// `pending` - the writer can never produce `approved`.
pub async fn create_content(
    pool: &SqlitePool,
    base: &NewContent,
    details: &KindDetails,
) -> Result<Uuid> {
    content::validate(base, details)?;

    let kind = details.kind();
    let id = ids::generate();
    let now = time::now_ms();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO content (guid, title, description, category, contributor_id,
                             region, is_featured, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, 0, 'pending', ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(&base.title)
    .bind(&base.description)
    .bind(kind.as_db_str())
    .bind(base.contributor_id.map(|c| c.to_string()))
    .bind(&base.region)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    match details {
        KindDetails::Story(story) => {
            sqlx::query(
                r#"
                INSERT INTO stories (content_id, body, read_time, moral_lesson,
                                     context, difficulty, cover_image)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id.to_string())
            .bind(&story.body)
            .bind(&story.read_time)
            .bind(&story.moral_lesson)
            .bind(&story.context)
            .bind(&story.difficulty)
            .bind(&story.cover_image)
            .execute(&mut *tx)
            .await?;
        }
        KindDetails::Proverb(proverb) => {
            sqlx::query(
                r#"
                INSERT INTO proverbs (content_id, body, english_translation,
                                      proverb_category, difficulty)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(id.to_string())
            .bind(&proverb.body)
            .bind(&proverb.english_translation)
            .bind(&proverb.proverb_category)
            .bind(&proverb.difficulty)
            .execute(&mut *tx)
            .await?;
        }
        KindDetails::Art(art) => {
            sqlx::query(
                r#"
                INSERT INTO artworks (content_id, body, technique, medium,
                                      time_to_create, difficulty, booking_available,
                                      booking_venue, booking_price)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id.to_string())
            .bind(&art.body)
            .bind(&art.technique)
            .bind(&art.medium)
            .bind(&art.time_to_create)
            .bind(&art.difficulty)
            .bind(art.booking_available as i64)
            .bind(&art.booking_venue)
            .bind(art.booking_price)
            .execute(&mut *tx)
            .await?;
        }
        KindDetails::Music(music) => {
            let tags_json = music
                .tags
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(|e| Error::Internal(format!("failed to serialize tags: {}", e)))?;

            sqlx::query(
                r#"
                INSERT INTO music_tracks (content_id, body, genre, audio_url,
                                          tags, tempo, cover_image)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id.to_string())
            .bind(&music.body)
            .bind(&music.genre)
            .bind(&music.audio_url)
            .bind(tags_json)
            .bind(&music.tempo)
            .bind(&music.cover_image)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    info!("Created {} content {} (pending review)", kind, id);
    Ok(id)
}
