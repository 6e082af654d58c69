//! Repository for the singleton `audio_settings` table.

use lectern_core::settings::{SettingsDefaults, SINGLETON_ID};
use sqlx::PgPool;

use crate::models::audio_settings::{AudioSettings, UpsertAudioSettings};

/// Column list for `audio_settings` queries.
const COLUMNS: &str = "id, title, relative_path, duration_seconds, created_at, updated_at";

/// Get-or-create and overwrite operations on the one settings row.
///
/// Every statement targets the fixed id and relies on the primary key for
/// atomicity, so concurrent callers can never produce a second row.
pub struct AudioSettingsRepo;

impl AudioSettingsRepo {
    /// Return the settings row, creating it with `defaults` if it does not
    /// exist yet.
    ///
    /// Uses a no-op `DO UPDATE` so `RETURNING` always produces a row; the
    /// loser of a concurrent first insert gets the winner's row back.
    pub async fn get_or_create(
        pool: &PgPool,
        defaults: &SettingsDefaults,
    ) -> Result<AudioSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO audio_settings (id, title, relative_path, duration_seconds) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET id = audio_settings.id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AudioSettings>(&query)
            .bind(SINGLETON_ID)
            .bind(&defaults.title)
            .bind(&defaults.relative_path)
            .bind(defaults.duration_seconds)
            .fetch_one(pool)
            .await
    }

    /// Read the settings row without creating it.
    pub async fn find(pool: &PgPool) -> Result<Option<AudioSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audio_settings WHERE id = $1");
        sqlx::query_as::<_, AudioSettings>(&query)
            .bind(SINGLETON_ID)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the mutable fields of the singleton row, inserting it if
    /// absent. Identity and `created_at` of an existing row are preserved.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertAudioSettings,
    ) -> Result<AudioSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO audio_settings (id, title, relative_path, duration_seconds) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 relative_path = EXCLUDED.relative_path, \
                 duration_seconds = EXCLUDED.duration_seconds, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        let settings = sqlx::query_as::<_, AudioSettings>(&query)
            .bind(SINGLETON_ID)
            .bind(&input.title)
            .bind(&input.relative_path)
            .bind(input.duration_seconds)
            .fetch_one(pool)
            .await?;

        tracing::debug!(
            relative_path = %settings.relative_path,
            duration_seconds = settings.duration_seconds,
            "Audio settings overwritten",
        );
        Ok(settings)
    }

    /// Number of rows in the table. Always 0 or 1.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audio_settings")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
