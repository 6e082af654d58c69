//! Integration tests for the singleton audio settings store.
//!
//! Exercises the repository against a real database:
//! - Lazy creation with defaults
//! - Repeated and concurrent get-or-create
//! - Upsert preserving identity
//! - Storage-level singleton and delete guards

use lectern_core::locale::Locale;
use lectern_core::settings::{SettingsDefaults, SINGLETON_ID};
use lectern_db::models::audio_settings::UpsertAudioSettings;
use lectern_db::repositories::AudioSettingsRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn defaults() -> SettingsDefaults {
    SettingsDefaults::for_locale(Locale::En)
}

fn input(title: &str, path: &str, duration: f64) -> UpsertAudioSettings {
    UpsertAudioSettings {
        title: title.to_string(),
        relative_path: path.to_string(),
        duration_seconds: duration,
    }
}

// ---------------------------------------------------------------------------
// get_or_create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_or_create_on_empty_store_inserts_defaults(pool: PgPool) {
    assert!(AudioSettingsRepo::find(&pool).await.unwrap().is_none());

    let settings = AudioSettingsRepo::get_or_create(&pool, &defaults())
        .await
        .unwrap();

    assert_eq!(settings.id, SINGLETON_ID);
    assert_eq!(settings.title, "Lecture Audio");
    assert_eq!(settings.relative_path, "audio/lecture.mp3");
    assert_eq!(settings.duration_seconds, 0.0);
    assert_eq!(AudioSettingsRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_or_create_is_idempotent(pool: PgPool) {
    let first = AudioSettingsRepo::get_or_create(&pool, &defaults())
        .await
        .unwrap();

    // Different defaults must not overwrite the existing row.
    let other = SettingsDefaults {
        title: "Other".into(),
        relative_path: "audio/other.mp3".into(),
        duration_seconds: 12.0,
    };
    for _ in 0..3 {
        let again = AudioSettingsRepo::get_or_create(&pool, &other).await.unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.title, first.title);
        assert_eq!(again.relative_path, first.relative_path);
        assert_eq!(again.updated_at, first.updated_at);
    }

    assert_eq!(AudioSettingsRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_first_access_creates_one_row(pool: PgPool) {
    let defaults = defaults();
    let calls = (0..16).map(|_| AudioSettingsRepo::get_or_create(&pool, &defaults));
    let results = futures::future::join_all(calls).await;

    for result in results {
        assert_eq!(result.unwrap().id, SINGLETON_ID);
    }
    assert_eq!(AudioSettingsRepo::count(&pool).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_on_empty_store_creates_singleton(pool: PgPool) {
    let saved = AudioSettingsRepo::upsert(&pool, &input("Keynote", "audio/keynote.mp3", 61.5))
        .await
        .unwrap();

    assert_eq!(saved.id, SINGLETON_ID);
    assert_eq!(saved.title, "Keynote");
    assert_eq!(AudioSettingsRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_overwrites_existing_row_and_keeps_identity(pool: PgPool) {
    let original = AudioSettingsRepo::get_or_create(&pool, &defaults())
        .await
        .unwrap();

    let saved = AudioSettingsRepo::upsert(&pool, &input("Panel", "audio/panel.ogg", 3600.0))
        .await
        .unwrap();

    assert_eq!(saved.id, original.id);
    assert_eq!(saved.created_at, original.created_at);
    assert_eq!(saved.title, "Panel");
    assert_eq!(saved.relative_path, "audio/panel.ogg");
    assert_eq!(saved.duration_seconds, 3600.0);
    assert!(saved.updated_at >= original.updated_at);
    assert_eq!(AudioSettingsRepo::count(&pool).await.unwrap(), 1);

    let reread = AudioSettingsRepo::get_or_create(&pool, &defaults())
        .await
        .unwrap();
    assert_eq!(reread.title, "Panel");
}

// ---------------------------------------------------------------------------
// Storage-level guards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_identity_is_rejected_by_schema(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO audio_settings (id, title, relative_path) VALUES (2, 'x', 'x.mp3')",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "a second settings row must be impossible");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_duration_is_rejected_by_schema(pool: PgPool) {
    let result = AudioSettingsRepo::upsert(&pool, &input("x", "x.mp3", -1.0)).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_is_blocked(pool: PgPool) {
    AudioSettingsRepo::get_or_create(&pool, &defaults())
        .await
        .unwrap();

    let result = sqlx::query("DELETE FROM audio_settings").execute(&pool).await;

    assert!(result.is_err());
    assert_eq!(AudioSettingsRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_succeeds(pool: PgPool) {
    lectern_db::health_check(&pool).await.unwrap();
}
