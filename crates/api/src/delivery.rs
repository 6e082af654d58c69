//! Audio and media file delivery.
//!
//! Resolves the configured relative path against the media root, checks the
//! file live on every request and streams it with explicit `Content-Length`,
//! `Accept-Ranges` and `Cache-Control` headers. Waveform players seek by
//! issuing range requests, so single byte ranges are answered with 206.

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lectern_core::locale::Locale;
use lectern_core::media;
use lectern_core::range::{self, ByteRange};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::config::MediaConfig;

/// `Cache-Control` sent with every successful audio response (one hour).
pub const AUDIO_CACHE_CONTROL: &str = "max-age=3600";

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure outcomes of the audio endpoint. Both carry a localized message
/// and answer in plain text.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The configured file does not exist (or may not be served).
    #[error("{0}")]
    NotFound(String),

    /// Any other failure while opening or reading the file.
    #[error("{0}")]
    Io(String),
}

impl DeliveryError {
    pub fn not_found(locale: Locale) -> Self {
        Self::NotFound(locale.audio_not_found().to_string())
    }

    /// Map an I/O error: file absence stays a 404, anything else is a 500.
    pub fn from_io(err: &io::Error, path: &Path, locale: Locale) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            tracing::info!(path = %path.display(), "Audio file vanished before it could be opened");
            return Self::not_found(locale);
        }
        tracing::error!(path = %path.display(), error = %err, "Failed to read audio file");
        Self::Io(locale.audio_read_failed(err))
    }
}

impl IntoResponse for DeliveryError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Io(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, [(header::CONTENT_TYPE, PLAIN_TEXT)], message).into_response()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve `relative_path` to an existing regular file inside the media root.
///
/// Refused paths (absolute, `..`, symlinks out of the root) are reported as
/// not found so no endpoint reveals what exists outside the root.
pub async fn locate_media_file(
    media_config: &MediaConfig,
    relative_path: &str,
    locale: Locale,
) -> Result<PathBuf, DeliveryError> {
    let path = media::resolve_media_path(&media_config.root, relative_path).map_err(|err| {
        tracing::warn!(relative_path, error = %err, "Refused media path");
        DeliveryError::not_found(locale)
    })?;

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            tracing::debug!(path = %path.display(), "Media path is not a regular file");
            return Err(DeliveryError::not_found(locale));
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Media file not found");
            return Err(DeliveryError::not_found(locale));
        }
    }

    let root = tokio::fs::canonicalize(&media_config.root)
        .await
        .map_err(|e| DeliveryError::from_io(&e, &media_config.root, locale))?;
    let canonical = tokio::fs::canonicalize(&path)
        .await
        .map_err(|e| DeliveryError::from_io(&e, &path, locale))?;
    if !canonical.starts_with(&root) {
        tracing::warn!(path = %path.display(), "Media path resolves outside the media root");
        return Err(DeliveryError::not_found(locale));
    }

    Ok(path)
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

/// Serve any file under the media root (the `MEDIA_URL` mount).
///
/// Containment is checked with [`locate_media_file`] first; `ServeFile` then
/// handles content type, conditional and range requests.
pub async fn serve_media_file(
    media_config: &MediaConfig,
    relative_path: &str,
    request: Request,
    locale: Locale,
) -> Result<Response, DeliveryError> {
    let path = locate_media_file(media_config, relative_path, locale).await?;
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.map(Body::new))
}

/// Serve the configured audio file, honouring a single `Range` header.
///
/// - no or unparseable `Range`: 200 with the whole file
/// - satisfiable range: 206 with `Content-Range`
/// - unsatisfiable range: 416 with `Content-Range: bytes */SIZE`
pub async fn serve_audio(
    media_config: &MediaConfig,
    relative_path: &str,
    range_header: Option<&HeaderValue>,
    locale: Locale,
) -> Result<Response, DeliveryError> {
    let path = locate_media_file(media_config, relative_path, locale).await?;
    let content_type = media::content_type_for_extension(&path);

    let mut file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| DeliveryError::from_io(&e, &path, locale))?;
    let file_size = file
        .metadata()
        .await
        .map_err(|e| DeliveryError::from_io(&e, &path, locale))?
        .len();

    let requested = range_header
        .and_then(|v| v.to_str().ok())
        .and_then(range::parse_range_header);

    let Some(requested) = requested else {
        let stream = ReaderStream::new(file);
        return Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (header::CONTENT_LENGTH, file_size.to_string()),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CACHE_CONTROL, AUDIO_CACHE_CONTROL.to_string()),
            ],
            Body::from_stream(stream),
        )
            .into_response());
    };

    serve_range(file, &path, file_size, requested, content_type, locale).await
}

async fn serve_range(
    mut file: tokio::fs::File,
    path: &Path,
    file_size: u64,
    requested: ByteRange,
    content_type: &'static str,
    locale: Locale,
) -> Result<Response, DeliveryError> {
    let Some((start, end)) = requested.resolve(file_size) else {
        tracing::debug!(?requested, file_size, "Unsatisfiable audio range");
        return Ok((
            StatusCode::RANGE_NOT_SATISFIABLE,
            [
                (header::CONTENT_RANGE, format!("bytes */{file_size}")),
                (header::ACCEPT_RANGES, "bytes".to_string()),
            ],
            Body::empty(),
        )
            .into_response());
    };

    let length = end - start + 1;
    file.seek(io::SeekFrom::Start(start))
        .await
        .map_err(|e| DeliveryError::from_io(&e, path, locale))?;
    let stream = ReaderStream::new(file.take(length));

    Ok((
        StatusCode::PARTIAL_CONTENT,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
            (
                header::CONTENT_RANGE,
                format!("bytes {start}-{end}/{file_size}"),
            ),
            (header::ACCEPT_RANGES, "bytes".to_string()),
            (header::CACHE_CONTROL, AUDIO_CACHE_CONTROL.to_string()),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
