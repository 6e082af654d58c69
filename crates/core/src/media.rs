//! Media root path resolution, public URLs and audio content types.
//!
//! The settings record stores a free-form relative path. Everything that
//! turns that string into a filesystem location goes through
//! [`resolve_media_path`], which refuses absolute paths and `..` segments,
//! and [`file_status`], which additionally refuses symlinks that lead out of
//! the media root.

use std::path::{Component, Path, PathBuf};

/// Content type used when the extension is unknown.
pub const FALLBACK_AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Why a relative media path was refused before touching the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("path must be relative to the media root")]
    Absolute,
    #[error("path escapes the media root")]
    Traversal,
}

/// Result of a live filesystem check of a configured audio path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// A regular file inside the media root.
    Present(PathBuf),
    /// Nothing usable at the resolved path (absent, a directory, unreadable).
    Missing(PathBuf),
    /// The path was refused (lexically or because it resolves outside the root).
    Rejected(PathError),
}

impl FileStatus {
    pub fn exists(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Join `relative` onto `root` after checking it lexically.
///
/// `.` segments are dropped; `..`, root and prefix components are refused.
pub fn resolve_media_path(root: &Path, relative: &str) -> Result<PathBuf, PathError> {
    let relative = relative.trim();
    if relative.is_empty() {
        return Err(PathError::Empty);
    }

    let mut resolved = root.to_path_buf();
    let mut pushed = false;
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir => return Err(PathError::Traversal),
            Component::RootDir | Component::Prefix(_) => return Err(PathError::Absolute),
        }
    }

    if !pushed {
        return Err(PathError::Empty);
    }
    Ok(resolved)
}

/// Whether `candidate` (after following symlinks) lies inside `root`.
pub fn is_within_root(root: &Path, candidate: &Path) -> std::io::Result<bool> {
    let root = root.canonicalize()?;
    let candidate = candidate.canonicalize()?;
    Ok(candidate.starts_with(root))
}

/// Check the configured path against the filesystem right now.
///
/// Never cached: a file fixed or removed between two calls is reflected
/// immediately.
pub fn file_status(root: &Path, relative: &str) -> FileStatus {
    let full_path = match resolve_media_path(root, relative) {
        Ok(path) => path,
        Err(err) => return FileStatus::Rejected(err),
    };

    match std::fs::metadata(&full_path) {
        Ok(meta) if meta.is_file() => {}
        _ => return FileStatus::Missing(full_path),
    }

    match is_within_root(root, &full_path) {
        Ok(true) => FileStatus::Present(full_path),
        Ok(false) => FileStatus::Rejected(PathError::Traversal),
        Err(_) => FileStatus::Missing(full_path),
    }
}

// ---------------------------------------------------------------------------
// URLs and content types
// ---------------------------------------------------------------------------

/// Public URL of a media file: `base` followed by `relative`, with exactly one
/// slash between them.
pub fn public_url(base: &str, relative: &str) -> String {
    let relative = relative.trim().trim_start_matches('/');
    if base.is_empty() {
        return relative.to_string();
    }
    format!("{}/{relative}", base.trim_end_matches('/'))
}

/// Guess an audio Content-Type from a file extension.
///
/// Falls back to [`FALLBACK_AUDIO_CONTENT_TYPE`] for unknown or missing
/// extensions.
pub fn content_type_for_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "mp3" | "mpga" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "flac" => "audio/flac",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        "webm" => "audio/webm",
        "aif" | "aiff" => "audio/aiff",
        _ => FALLBACK_AUDIO_CONTENT_TYPE,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
