pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Fixed path of the audio stream, independent of the configured file name.
pub const AUDIO_FILE_PATH: &str = "/audio/output.mp3";

/// Build the public, root-level routes.
///
/// ```text
/// /                       player page
/// /audio/output.mp3       audio stream (range-capable)
/// ```
pub fn player_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::player::player_page))
        .route(AUDIO_FILE_PATH, get(handlers::audio::audio_file))
}

/// Build the `/api/v1` route tree.
///
/// ```text
/// /player                 player view model (JSON)
/// /admin/settings         get, update, delete (admin token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/player", get(handlers::player::player_context))
        .route(
            "/admin/settings",
            get(handlers::settings::get_settings)
                .put(handlers::settings::update_settings)
                .delete(handlers::settings::delete_settings),
        )
}
