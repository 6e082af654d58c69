//! Handlers for the player page and its JSON context.
//!
//! Both read the singleton settings row (creating it on first access) and
//! derive the view model from it plus a live filesystem check.

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use lectern_core::locale::Locale;
use lectern_core::media;
use lectern_db::models::audio_settings::AudioSettings;
use lectern_db::repositories::AudioSettingsRepo;
use serde::Serialize;

use crate::config::MediaConfig;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::routes::AUDIO_FILE_PATH;
use crate::state::AppState;

/// Everything the front-end player needs to render and load the audio.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub title: String,
    pub relative_path: String,
    /// Media URL of the file (`MEDIA_URL` + relative path).
    pub public_url: String,
    /// Endpoint that streams the file with range support.
    pub stream_url: &'static str,
    pub duration_seconds: f64,
    /// Live check at render time, never cached.
    pub file_exists: bool,
}

impl PlayerView {
    pub fn build(settings: &AudioSettings, media_config: &MediaConfig) -> Self {
        let file_exists = media::file_status(&media_config.root, &settings.relative_path).exists();
        Self {
            title: settings.title.clone(),
            relative_path: settings.relative_path.clone(),
            public_url: media::public_url(&media_config.url_base, &settings.relative_path),
            stream_url: AUDIO_FILE_PATH,
            duration_seconds: settings.duration_seconds,
            file_exists,
        }
    }
}

async fn current_view(state: &AppState) -> AppResult<PlayerView> {
    let settings = AudioSettingsRepo::get_or_create(&state.pool, &state.config.defaults).await?;
    Ok(PlayerView::build(&settings, &state.config.media))
}

/// GET /
///
/// Render the player page.
pub async fn player_page(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let view = current_view(&state).await?;
    if !view.file_exists {
        tracing::warn!(relative_path = %view.relative_path, "Rendering player without audio file");
    }
    Ok(Html(render_page(&view, state.config.locale)))
}

/// GET /api/v1/player
///
/// The same view model as JSON, for clients that render the player themselves.
pub async fn player_context(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let view = current_view(&state).await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the full HTML document for `view`.
pub fn render_page(view: &PlayerView, locale: Locale) -> String {
    let title = escape_html(&view.title);
    let stream_url = escape_html(view.stream_url);
    let notice = if view.file_exists {
        String::new()
    } else {
        format!(
            r#"<p class="notice" id="file-missing">{}</p>"#,
            escape_html(locale.page_file_missing())
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<main class="player">
<h1 id="lecture-title">{title}</h1>
{notice}
<div id="waveform"></div>
<audio id="audio-element" preload="metadata" src="{stream_url}"></audio>
<div class="controls">
<button type="button" id="play-btn">&#9654;</button>
<button type="button" id="pause-btn">&#10074;&#10074;</button>
<span id="current-time">0:00</span> / <span id="total-time">0:00</span>
<input type="range" id="volume-slider" min="0" max="1" step="0.05" value="1">
</div>
</main>
<script type="application/json" id="player-context">{context}</script>
<script>
(function () {{
  var ctx = JSON.parse(document.getElementById("player-context").textContent);
  var audio = document.getElementById("audio-element");
  var fmt = function (s) {{
    if (!isFinite(s)) {{ return "0:00"; }}
    var m = Math.floor(s / 60), r = Math.floor(s % 60);
    return m + ":" + (r < 10 ? "0" : "") + r;
  }};
  document.getElementById("play-btn").onclick = function () {{ audio.play(); }};
  document.getElementById("pause-btn").onclick = function () {{ audio.pause(); }};
  document.getElementById("volume-slider").oninput = function (e) {{
    audio.volume = e.target.value;
  }};
  audio.ontimeupdate = function () {{
    document.getElementById("current-time").textContent = fmt(audio.currentTime);
  }};
  audio.onloadedmetadata = function () {{
    document.getElementById("total-time").textContent = fmt(audio.duration || ctx.duration_seconds);
  }};
  window.AudioPlayer = {{ context: ctx, element: audio }};
}})();
</script>
</body>
</html>
"#,
        lang = locale.tag(),
        context = json_for_script(view),
    )
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize `view` for embedding inside a `<script>` element.
fn json_for_script(view: &PlayerView) -> String {
    serde_json::to_string(view)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
