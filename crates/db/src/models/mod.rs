//! Row structs and input DTOs, one module per table.

pub mod audio_settings;
