//! Handler for files under the media root (`MEDIA_URL`).

use axum::extract::{Path, Request, State};
use axum::response::Response;

use crate::delivery::{self, DeliveryError};
use crate::state::AppState;

/// GET {MEDIA_URL}/{*path}
///
/// Serve a file from the media root. The path goes through the same
/// containment check as the audio endpoint, so symlinks that leave the root
/// answer 404.
pub async fn media_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
    request: Request,
) -> Result<Response, DeliveryError> {
    delivery::serve_media_file(&state.config.media, &path, request, state.config.locale).await
}
