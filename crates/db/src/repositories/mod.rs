//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod audio_settings_repo;

pub use audio_settings_repo::AudioSettingsRepo;
