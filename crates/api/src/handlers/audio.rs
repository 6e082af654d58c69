//! Handler for the audio file endpoint.
//!
//! Unlike the JSON API, failures here answer in localized plain text:
//! 404 when the file is absent, 500 for anything else.

use axum::extract::State;
use axum::http::header::{self, HeaderMap};
use axum::response::Response;
use lectern_db::repositories::AudioSettingsRepo;

use crate::delivery::{self, DeliveryError};
use crate::state::AppState;

/// GET /audio/output.mp3
///
/// Stream the file named by the current settings row. The path is fixed so
/// the player URL never changes when the configured file does.
pub async fn audio_file(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, DeliveryError> {
    let locale = state.config.locale;

    let settings = AudioSettingsRepo::get_or_create(&state.pool, &state.config.defaults)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Failed to load audio settings");
            DeliveryError::Io(locale.audio_read_failed(&locale.settings_unavailable()))
        })?;

    delivery::serve_audio(
        &state.config.media,
        &settings.relative_path,
        headers.get(header::RANGE),
        locale,
    )
    .await
}
