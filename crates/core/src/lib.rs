//! Domain types and logic shared by the Lectern crates.
//!
//! Nothing here talks to the database or HTTP; filesystem access is limited
//! to stat calls used by existence checks.

pub mod error;
pub mod locale;
pub mod media;
pub mod range;
pub mod settings;
pub mod types;
