//! Content-based format detection.
//!
//! The sniffer inspects a bounded byte prefix and classifies it into the
//! [`MediaType`] vocabulary using a static table of magic-byte signatures.
//! Selection is deterministic: highest priority wins, ties go to the longest
//! matched pattern, then to the signature whose type agrees with the filename
//! hint, then to table order.
//!
//! Filenames are never trusted on their own. They only break ties between
//! signatures that already matched the content, and refine the text-family
//! classification when no binary signature matched at all.
//!
//! Sniffing is a pure function over the prefix: it has no side effects and
//! never fails. `Unknown` is a valid terminal answer, including for the empty
//! prefix and for prefixes too short to satisfy any pattern.

use crate::media::MediaType;
use memchr::memmem;

/// Fixed-offset patterns all fit inside this many leading bytes.
pub const MIN_SNIFF_LEN: usize = 64;

/// Default prefix window. Larger than [`MIN_SNIFF_LEN`] because OOXML
/// discrimination searches for the container's entry names, which float
/// behind the ZIP local-file headers.
pub const DEFAULT_SNIFF_LEN: usize = 4096;

/// One component of a signature.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Exact bytes at a fixed offset. Gaps between `At` parts act as
    /// wildcard regions.
    At { offset: usize, bytes: &'static [u8] },
    /// Needle searched anywhere within the first `window` bytes of the
    /// prefix. Used for container formats whose discriminating entry name
    /// has no fixed position.
    Search { needle: &'static [u8], window: usize },
}

impl Pattern {
    /// Matched byte count if the pattern holds against `prefix`.
    fn matches(&self, prefix: &[u8]) -> Option<usize> {
        match self {
            Pattern::At { offset, bytes } => {
                let end = offset.checked_add(bytes.len())?;
                if prefix.len() >= end && &prefix[*offset..end] == *bytes {
                    Some(bytes.len())
                } else {
                    None
                }
            }
            Pattern::Search { needle, window } => {
                let haystack = &prefix[..prefix.len().min(*window)];
                memmem::find(haystack, needle).map(|_| needle.len())
            }
        }
    }
}

/// A byte-prefix rule recognizing one media type.
///
/// The table below is defined at process start and never mutated.
#[derive(Debug)]
struct Signature {
    media_type: MediaType,
    priority: i32,
    patterns: &'static [Pattern],
}

impl Signature {
    /// Total matched bytes if every pattern holds; a single failing pattern
    /// (including one truncated away by a short prefix) fails the signature.
    fn matches(&self, prefix: &[u8]) -> Option<usize> {
        let mut total = 0usize;
        for pattern in self.patterns {
            total += pattern.matches(prefix)?;
        }
        Some(total)
    }
}

const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";

/// The built-in signature table.
///
/// OOXML types outrank the generic ZIP signature; ZIP in turn outranks
/// nothing, so a plain archive classifies as `Zip` rather than as whichever
/// OOXML entry name happens to be absent.
static SIGNATURES: &[Signature] = &[
    Signature {
        media_type: MediaType::Docx,
        priority: 80,
        patterns: &[
            Pattern::At { offset: 0, bytes: ZIP_LOCAL_HEADER },
            Pattern::Search { needle: b"word/", window: DEFAULT_SNIFF_LEN },
        ],
    },
    Signature {
        media_type: MediaType::Pptx,
        priority: 80,
        patterns: &[
            Pattern::At { offset: 0, bytes: ZIP_LOCAL_HEADER },
            Pattern::Search { needle: b"ppt/", window: DEFAULT_SNIFF_LEN },
        ],
    },
    Signature {
        media_type: MediaType::Xlsx,
        priority: 80,
        patterns: &[
            Pattern::At { offset: 0, bytes: ZIP_LOCAL_HEADER },
            Pattern::Search { needle: b"xl/", window: DEFAULT_SNIFF_LEN },
        ],
    },
    Signature {
        media_type: MediaType::Pdf,
        priority: 70,
        patterns: &[Pattern::At { offset: 0, bytes: b"%PDF" }],
    },
    Signature {
        media_type: MediaType::Html,
        priority: 60,
        patterns: &[Pattern::At { offset: 0, bytes: b"<!DOCTYPE html" }],
    },
    Signature {
        media_type: MediaType::Html,
        priority: 60,
        patterns: &[Pattern::At { offset: 0, bytes: b"<!doctype html" }],
    },
    Signature {
        media_type: MediaType::Html,
        priority: 60,
        patterns: &[Pattern::At { offset: 0, bytes: b"<html" }],
    },
    Signature {
        media_type: MediaType::Xml,
        priority: 60,
        patterns: &[Pattern::At { offset: 0, bytes: b"<?xml" }],
    },
    Signature {
        media_type: MediaType::Zip,
        priority: 10,
        patterns: &[Pattern::At { offset: 0, bytes: ZIP_LOCAL_HEADER }],
    },
];

/// Deterministic media type detector.
///
/// Construction is free; the signature table is static. The sniffer is
/// stateless and can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Sniffer {
    signatures: &'static [Signature],
}

impl Default for Sniffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sniffer {
    pub fn new() -> Self {
        Self { signatures: SIGNATURES }
    }

    /// Classify a byte prefix, optionally informed by a filename hint.
    ///
    /// The prefix should be at most the caller's sniff window; passing the
    /// whole input is allowed but `Search` patterns still stop at their own
    /// window. Short prefixes match whatever still fits.
    pub fn sniff(&self, prefix: &[u8], filename: Option<&str>) -> MediaType {
        if prefix.is_empty() {
            return MediaType::Unknown;
        }

        let hinted = filename.and_then(MediaType::from_path);

        if let Some(media) = self.best_signature(prefix, hinted) {
            tracing::debug!(media_type = %media, "signature match");
            return media;
        }

        if let Some(media) = infer_fallback(prefix) {
            tracing::debug!(media_type = %media, "infer fallback match");
            return media;
        }

        if looks_textual(prefix) {
            // Text-family refinement: the extension picks among the textual
            // types only; a .docx hint cannot turn text into a container.
            let media = match hinted {
                Some(media) if media.is_textual() => media,
                _ => MediaType::PlainText,
            };
            tracing::debug!(media_type = %media, "text heuristic match");
            return media;
        }

        MediaType::Unknown
    }

    fn best_signature(&self, prefix: &[u8], hinted: Option<MediaType>) -> Option<MediaType> {
        let mut best: Option<(i32, usize, bool, MediaType)> = None;

        for signature in self.signatures {
            let matched_len = match signature.matches(prefix) {
                Some(len) => len,
                None => continue,
            };
            let agrees = hinted == Some(signature.media_type);
            let candidate = (signature.priority, matched_len, agrees, signature.media_type);

            let better = match &best {
                None => true,
                Some((priority, len, agreed, _)) => {
                    (candidate.0, candidate.1, candidate.2) > (*priority, *len, *agreed)
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        best.map(|(_, _, _, media)| media)
    }
}

/// Secondary evidence from the `infer` database, mapped into the closed set.
///
/// Only consulted when the first-party table had no opinion, so it can widen
/// coverage (e.g. OOXML whose entry names fall outside our search window)
/// without ever overriding a deterministic match.
fn infer_fallback(prefix: &[u8]) -> Option<MediaType> {
    let kind = infer::get(prefix)?;
    MediaType::from_mime(kind.mime_type())
}

/// Whether the prefix reads as text: valid UTF-8 with no control characters
/// beyond whitespace. A multibyte sequence cut off by the window edge is not
/// held against the input.
fn looks_textual(prefix: &[u8]) -> bool {
    let text = match std::str::from_utf8(prefix) {
        Ok(text) => text,
        // `error_len() == None` means the prefix ends mid-sequence.
        Err(e) if e.error_len().is_none() && e.valid_up_to() > 0 => {
            match std::str::from_utf8(&prefix[..e.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };

    !text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\u{000c}'))
}
