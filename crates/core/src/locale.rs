//! User-facing message catalog.
//!
//! Every message that reaches a listener of the player (plain-text error
//! bodies, validation messages, the default title) is looked up here so the
//! deployment can pick a language with `PLAYER_LOCALE`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Supported message languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    /// Language tag used in the `lang` attribute of the rendered page.
    pub fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    /// Title given to the settings record when it is first created.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::En => "Lecture Audio",
            Self::Ja => "講演音声",
        }
    }

    /// Body of the 404 returned when the configured audio file is absent.
    pub fn audio_not_found(self) -> &'static str {
        match self {
            Self::En => "Audio file not found",
            Self::Ja => "音声ファイルが見つかりません",
        }
    }

    /// Body of the 500 returned when reading the audio file fails.
    pub fn audio_read_failed(self, detail: &dyn fmt::Display) -> String {
        match self {
            Self::En => format!("An error occurred while reading the audio file: {detail}"),
            Self::Ja => format!("音声ファイルの読み込みでエラーが発生しました: {detail}"),
        }
    }

    /// Detail appended to the read failure when the settings row cannot be
    /// loaded.
    pub fn settings_unavailable(self) -> &'static str {
        match self {
            Self::En => "settings unavailable",
            Self::Ja => "設定を読み込めません",
        }
    }

    /// Field message for an administrator-supplied path that does not exist.
    pub fn audio_path_missing(self, full_path: &dyn fmt::Display) -> String {
        match self {
            Self::En => format!("Audio file not found: {full_path}"),
            Self::Ja => format!("音声ファイルが見つかりません: {full_path}"),
        }
    }

    /// Field message for a path that escapes the media root.
    pub fn audio_path_outside_root(self) -> &'static str {
        match self {
            Self::En => "Audio file path must stay inside the media directory",
            Self::Ja => "音声ファイルのパスはメディアディレクトリ内である必要があります",
        }
    }

    /// Notice shown on the player page when the file is missing.
    pub fn page_file_missing(self) -> &'static str {
        match self {
            Self::En => "The audio file is not available yet.",
            Self::Ja => "音声ファイルがまだ用意されていません。",
        }
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "ja" | "ja-jp" => Ok(Self::Ja),
            other => Err(CoreError::Validation(format!(
                "Unknown locale '{other}'. Must be one of: en, ja"
            ))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
