//! Audio settings entity model and DTOs.

use lectern_core::settings::SettingsDefaults;
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `audio_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AudioSettings {
    pub id: DbId,
    pub title: String,
    pub relative_path: String,
    pub duration_seconds: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Whole-record overwrite of the mutable settings fields.
///
/// Carries no identity: writing it always targets the singleton row.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UpsertAudioSettings {
    pub title: String,
    pub relative_path: String,
    #[serde(default)]
    pub duration_seconds: f64,
}

impl From<SettingsDefaults> for UpsertAudioSettings {
    fn from(defaults: SettingsDefaults) -> Self {
        Self {
            title: defaults.title,
            relative_path: defaults.relative_path,
            duration_seconds: defaults.duration_seconds,
        }
    }
}
