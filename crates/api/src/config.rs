use std::path::PathBuf;

use lectern_core::locale::Locale;
use lectern_core::settings::{SettingsDefaults, DEFAULT_RELATIVE_PATH};

/// Where audio files live on disk and how the browser reaches them.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory that settings paths are resolved against.
    pub root: PathBuf,
    /// Public URL prefix for files under `root` (e.g. `/media/`).
    pub url_base: String,
}

impl MediaConfig {
    /// Mount point for serving `root` directly, when `url_base` is a local
    /// path (not an external origin such as a CDN).
    pub fn local_mount(&self) -> Option<String> {
        if !self.url_base.starts_with('/') || self.url_base.starts_with("//") {
            return None;
        }
        let trimmed = self.url_base.trim_end_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Language of user-facing messages.
    pub locale: Locale,
    /// Media root and public URL base.
    pub media: MediaConfig,
    /// Values for the settings row when it is created lazily.
    pub defaults: SettingsDefaults,
    /// Bearer token for the admin API. `None` disables the admin API.
    pub admin_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                     |
    /// |--------------------------|-----------------------------|
    /// | `HOST`                   | `0.0.0.0`                   |
    /// | `PORT`                   | `3000`                      |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                        |
    /// | `PLAYER_LOCALE`          | `en`                        |
    /// | `MEDIA_ROOT`             | `media`                     |
    /// | `MEDIA_URL`              | `/media/`                   |
    /// | `DEFAULT_AUDIO_TITLE`    | locale default title        |
    /// | `DEFAULT_AUDIO_PATH`     | `audio/lecture.mp3`         |
    /// | `DEFAULT_AUDIO_DURATION` | `0`                         |
    /// | `ADMIN_TOKEN`            | unset                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let locale: Locale = std::env::var("PLAYER_LOCALE")
            .unwrap_or_else(|_| "en".into())
            .parse()
            .expect("PLAYER_LOCALE must be one of: en, ja");

        let media = MediaConfig {
            root: std::env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "media".into())
                .into(),
            url_base: std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".into()),
        };

        let duration_seconds: f64 = std::env::var("DEFAULT_AUDIO_DURATION")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("DEFAULT_AUDIO_DURATION must be a number");

        let defaults = SettingsDefaults {
            title: std::env::var("DEFAULT_AUDIO_TITLE")
                .unwrap_or_else(|_| locale.default_title().into()),
            relative_path: std::env::var("DEFAULT_AUDIO_PATH")
                .unwrap_or_else(|_| DEFAULT_RELATIVE_PATH.into()),
            duration_seconds,
        };
        defaults
            .validate()
            .expect("DEFAULT_AUDIO_* values must pass settings validation");

        let admin_token = std::env::var("ADMIN_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            locale,
            media,
            defaults,
            admin_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(url_base: &str) -> MediaConfig {
        MediaConfig {
            root: "media".into(),
            url_base: url_base.into(),
        }
    }

    #[test]
    fn local_mount_for_path_prefix() {
        assert_eq!(media("/media/").local_mount().as_deref(), Some("/media"));
        assert_eq!(media("/static/audio").local_mount().as_deref(), Some("/static/audio"));
    }

    #[test]
    fn no_local_mount_for_external_or_root_prefix() {
        assert_eq!(media("https://cdn.example.com/media/").local_mount(), None);
        assert_eq!(media("//cdn.example.com/media/").local_mount(), None);
        assert_eq!(media("/").local_mount(), None);
    }
}
