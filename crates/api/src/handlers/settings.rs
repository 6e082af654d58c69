//! Handlers for the admin settings API.
//!
//! The settings row can be read and overwritten but never deleted. Writes
//! are validated field by field and then against the filesystem before the
//! upsert.

use std::path::PathBuf;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::media;
use lectern_core::settings;
use lectern_db::models::audio_settings::{AudioSettings, UpsertAudioSettings};
use lectern_db::repositories::AudioSettingsRepo;
use serde::Serialize;

use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Settings row plus the values derived from it.
#[derive(Debug, Serialize)]
pub struct SettingsDetail {
    #[serde(flatten)]
    pub settings: AudioSettings,
    pub full_path: Option<PathBuf>,
    pub public_url: String,
    pub file_exists: bool,
}

impl SettingsDetail {
    fn build(settings: AudioSettings, media_config: &MediaConfig) -> Self {
        let full_path = media::resolve_media_path(&media_config.root, &settings.relative_path).ok();
        let file_exists = media::file_status(&media_config.root, &settings.relative_path).exists();
        let public_url = media::public_url(&media_config.url_base, &settings.relative_path);
        Self {
            settings,
            full_path,
            public_url,
            file_exists,
        }
    }
}

/// Run every check an administrative write must pass.
pub fn validate_upsert(
    input: &UpsertAudioSettings,
    media_config: &MediaConfig,
    locale: lectern_core::locale::Locale,
) -> Result<(), CoreError> {
    settings::validate_title(&input.title)?;
    settings::validate_relative_path(&input.relative_path)?;
    settings::validate_duration(input.duration_seconds)?;
    settings::validate_file_exists(&media_config.root, &input.relative_path, locale)
}

/// GET /api/v1/admin/settings
pub async fn get_settings(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = AudioSettingsRepo::get_or_create(&state.pool, &state.config.defaults).await?;
    Ok(Json(DataResponse {
        data: SettingsDetail::build(settings, &state.config.media),
    }))
}

/// PUT /api/v1/admin/settings
///
/// Overwrite the settings row. The body carries no identity; the singleton
/// row is always the target.
pub async fn update_settings(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertAudioSettings>,
) -> AppResult<impl IntoResponse> {
    validate_upsert(&input, &state.config.media, state.config.locale)?;

    let settings = AudioSettingsRepo::upsert(&state.pool, &input).await?;

    tracing::info!(
        title = %settings.title,
        relative_path = %settings.relative_path,
        duration_seconds = settings.duration_seconds,
        "Audio settings updated",
    );

    Ok(Json(DataResponse {
        data: SettingsDetail::build(settings, &state.config.media),
    }))
}

/// DELETE /api/v1/admin/settings
///
/// The settings row is permanent; always 403.
pub async fn delete_settings(_admin: RequireAdmin) -> AppResult<()> {
    Err(AppError::Core(CoreError::Forbidden(
        "Audio settings cannot be deleted".into(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use lectern_core::locale::Locale;

    fn input(title: &str, path: &str, duration: f64) -> UpsertAudioSettings {
        UpsertAudioSettings {
            title: title.into(),
            relative_path: path.into(),
            duration_seconds: duration,
        }
    }

    #[test]
    fn validate_upsert_accepts_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"ID3").unwrap();
        let media_config = MediaConfig {
            root: dir.path().to_path_buf(),
            url_base: "/media/".into(),
        };

        assert!(validate_upsert(&input("Talk", "a.mp3", 10.0), &media_config, Locale::En).is_ok());
    }

    #[test]
    fn validate_upsert_checks_fields_before_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let media_config = MediaConfig {
            root: dir.path().to_path_buf(),
            url_base: "/media/".into(),
        };

        assert_matches!(
            validate_upsert(&input("", "a.mp3", 0.0), &media_config, Locale::En),
            Err(CoreError::InvalidField { field: "title", .. })
        );
        assert_matches!(
            validate_upsert(&input("Talk", "a.mp3", -5.0), &media_config, Locale::En),
            Err(CoreError::InvalidField { field: "duration_seconds", .. })
        );
        assert_matches!(
            validate_upsert(&input("Talk", "a.mp3", 0.0), &media_config, Locale::En),
            Err(CoreError::InvalidField { field: "relative_path", .. })
        );
    }
}
