//! Audio settings constants, defaults and validation.
//!
//! Field checks mirror the column limits in the `audio_settings` migration.
//! The file-existence check is advisory: administrative writes call it, the
//! public page and file endpoints never do.

use std::path::Path;

use serde::Serialize;

use crate::error::CoreError;
use crate::locale::Locale;
use crate::media::{self, FileStatus, PathError};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The fixed primary key of the one settings row.
pub const SINGLETON_ID: DbId = 1;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum relative path length in characters.
pub const MAX_PATH_LEN: usize = 500;

/// Default relative path of the audio file.
pub const DEFAULT_RELATIVE_PATH: &str = "audio/lecture.mp3";

pub const FIELD_TITLE: &str = "title";
pub const FIELD_RELATIVE_PATH: &str = "relative_path";
pub const FIELD_DURATION: &str = "duration_seconds";

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Field values used when the settings row is created lazily.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsDefaults {
    pub title: String,
    pub relative_path: String,
    pub duration_seconds: f64,
}

impl SettingsDefaults {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            title: locale.default_title().to_string(),
            relative_path: DEFAULT_RELATIVE_PATH.to_string(),
            duration_seconds: 0.0,
        }
    }

    /// Run the field validators over the defaults. The row is created from
    /// these values without any other check, so invalid defaults would fail
    /// every first access.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_relative_path(&self.relative_path)?;
        validate_duration(self.duration_seconds)
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Title must be non-blank and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(invalid(FIELD_TITLE, "Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(invalid(
            FIELD_TITLE,
            format!("Title must be at most {MAX_TITLE_LEN} characters"),
        ));
    }
    Ok(())
}

/// Relative path must be non-blank, at most [`MAX_PATH_LEN`] characters and
/// pass the lexical checks of [`media::resolve_media_path`].
pub fn validate_relative_path(relative_path: &str) -> Result<(), CoreError> {
    if relative_path.chars().count() > MAX_PATH_LEN {
        return Err(invalid(
            FIELD_RELATIVE_PATH,
            format!("Path must be at most {MAX_PATH_LEN} characters"),
        ));
    }
    media::resolve_media_path(Path::new("."), relative_path)
        .map(|_| ())
        .map_err(|e| invalid(FIELD_RELATIVE_PATH, format!("Invalid path: {e}")))
}

/// Duration must be finite and non-negative.
pub fn validate_duration(duration_seconds: f64) -> Result<(), CoreError> {
    if !duration_seconds.is_finite() || duration_seconds < 0.0 {
        return Err(invalid(
            FIELD_DURATION,
            format!("Duration must be a non-negative number of seconds, got {duration_seconds}"),
        ));
    }
    Ok(())
}

/// Fails unless `media_root + relative_path` is an existing regular file
/// inside the media root.
pub fn validate_file_exists(
    media_root: &Path,
    relative_path: &str,
    locale: Locale,
) -> Result<(), CoreError> {
    match media::file_status(media_root, relative_path) {
        FileStatus::Present(_) => Ok(()),
        FileStatus::Missing(full_path) => Err(invalid(
            FIELD_RELATIVE_PATH,
            locale.audio_path_missing(&full_path.display()),
        )),
        FileStatus::Rejected(PathError::Traversal | PathError::Absolute) => Err(invalid(
            FIELD_RELATIVE_PATH,
            locale.audio_path_outside_root().to_string(),
        )),
        FileStatus::Rejected(PathError::Empty) => {
            Err(invalid(FIELD_RELATIVE_PATH, "Path must not be empty".into()))
        }
    }
}

fn invalid(field: &'static str, message: String) -> CoreError {
    CoreError::InvalidField { field, message }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
