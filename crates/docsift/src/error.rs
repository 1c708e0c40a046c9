//! Error types for docsift.
//!
//! All fallible operations in the library return [`Result`], with
//! [`ExtractError`] as the single error type. The taxonomy mirrors the
//! failure semantics of the extraction pipeline:
//!
//! - `Io` errors always bubble up unchanged. They indicate real system
//!   problems (missing files, permission errors) the caller must see.
//! - `UnsupportedFormat` and `DecodeFailed` are terminal classifications of
//!   the input, not of the system; callers can recover from them (skip the
//!   file, retry with an explicit media type, etc.).
//! - The library never logs or prints an error on its own. Presentation is
//!   owned by the caller.

use crate::media::MediaType;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Boxed error source, kept `Send + Sync` so results cross thread boundaries.
pub type ErrorSource = Box<dyn std::error::Error + Send + Sync>;

fn fmt_hint(filename_hint: &Option<String>) -> String {
    match filename_hint {
        Some(name) => format!(" for '{}'", name),
        None => String::new(),
    }
}

/// Main error type for all docsift operations.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The underlying byte source could not be read. Always bubbles up
    /// unchanged from the stream layer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sniffing produced [`MediaType::Unknown`], or a recognized type with no
    /// registered decoder.
    #[error("unsupported format{}", fmt_hint(.filename_hint))]
    UnsupportedFormat {
        /// Filename the caller supplied, carried for diagnostics.
        filename_hint: Option<String>,
        /// What the sniffer concluded before the lookup failed.
        detected: MediaType,
    },

    /// The bound decoder failed while parsing recognized-but-malformed
    /// content. Not retried: a deterministic parse failure stays failed.
    #[error("decoding {media_type} failed: {message}")]
    DecodeFailed {
        media_type: MediaType,
        message: String,
        #[source]
        source: Option<ErrorSource>,
    },

    /// The decoder did not complete within the configured deadline.
    #[error("decoding {media_type} timed out after {elapsed:?}")]
    Timeout { media_type: MediaType, elapsed: Duration },

    /// Invalid registration or configuration input.
    #[error("validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<ErrorSource>,
    },
}

impl ExtractError {
    /// Create an `UnsupportedFormat` error.
    pub fn unsupported(detected: MediaType, filename_hint: Option<&str>) -> Self {
        Self::UnsupportedFormat {
            filename_hint: filename_hint.map(str::to_owned),
            detected,
        }
    }

    /// Create a `DecodeFailed` error without a source chain.
    pub fn decode_failed<S: Into<String>>(media_type: MediaType, message: S) -> Self {
        Self::DecodeFailed {
            media_type,
            message: message.into(),
            source: None,
        }
    }

    /// Create a `DecodeFailed` error preserving the underlying cause.
    pub fn decode_failed_with_source<S, E>(media_type: MediaType, message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeFailed {
            media_type,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a `Validation` error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// The media type this error is about, where one applies.
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            Self::UnsupportedFormat { detected, .. } => Some(*detected),
            Self::DecodeFailed { media_type, .. } | Self::Timeout { media_type, .. } => Some(*media_type),
            Self::Io(_) | Self::Validation { .. } => None,
        }
    }
}
