//! Media type vocabulary.
//!
//! [`MediaType`] is the closed set of formats the dispatcher knows about.
//! Sniffing, registry lookup and error reporting all speak this vocabulary;
//! MIME strings and file extensions exist only at the edges (filename hints,
//! CLI reports, interop with MIME-typed callers).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const HTML_MIME_TYPE: &str = "text/html";
pub const XML_MIME_TYPE: &str = "application/xml";
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const ZIP_MIME_TYPE: &str = "application/zip";

/// A document format classification.
///
/// The set is closed on purpose: every variant is either decodable by a
/// registered capability or has documented fallback behavior. `Unknown` is a
/// valid terminal classification produced by the sniffer, never an error on
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaType {
    Pdf,
    Docx,
    Pptx,
    Xlsx,
    Html,
    Xml,
    Markdown,
    PlainText,
    Zip,
    Unknown,
}

/// Extension to media type mapping, used for filename hints.
static EXT_TO_MEDIA: Lazy<HashMap<&'static str, MediaType>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("pdf", MediaType::Pdf);

    m.insert("docx", MediaType::Docx);
    m.insert("pptx", MediaType::Pptx);
    m.insert("xlsx", MediaType::Xlsx);

    m.insert("html", MediaType::Html);
    m.insert("htm", MediaType::Html);
    m.insert("xml", MediaType::Xml);
    m.insert("svg", MediaType::Xml);

    m.insert("md", MediaType::Markdown);
    m.insert("markdown", MediaType::Markdown);
    m.insert("txt", MediaType::PlainText);
    m.insert("text", MediaType::PlainText);
    m.insert("log", MediaType::PlainText);
    m.insert("csv", MediaType::PlainText);
    m.insert("tsv", MediaType::PlainText);

    m.insert("zip", MediaType::Zip);

    m
});

impl MediaType {
    /// The canonical MIME string for this media type.
    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => PDF_MIME_TYPE,
            MediaType::Docx => DOCX_MIME_TYPE,
            MediaType::Pptx => PPTX_MIME_TYPE,
            MediaType::Xlsx => XLSX_MIME_TYPE,
            MediaType::Html => HTML_MIME_TYPE,
            MediaType::Xml => XML_MIME_TYPE,
            MediaType::Markdown => MARKDOWN_MIME_TYPE,
            MediaType::PlainText => PLAIN_TEXT_MIME_TYPE,
            MediaType::Zip => ZIP_MIME_TYPE,
            MediaType::Unknown => "application/octet-stream",
        }
    }

    /// Map a MIME string into the closed set.
    ///
    /// Accepts the handful of aliases that show up in the wild for the types
    /// we support. Anything else maps to `None`, not `Unknown`: an explicit
    /// MIME type the vocabulary cannot express is a caller error, while
    /// `Unknown` is reserved for the sniffer's own conclusion.
    pub fn from_mime(mime: &str) -> Option<MediaType> {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence {
            PDF_MIME_TYPE | "application/x-pdf" => Some(MediaType::Pdf),
            DOCX_MIME_TYPE => Some(MediaType::Docx),
            PPTX_MIME_TYPE => Some(MediaType::Pptx),
            XLSX_MIME_TYPE => Some(MediaType::Xlsx),
            HTML_MIME_TYPE | "application/xhtml+xml" => Some(MediaType::Html),
            XML_MIME_TYPE | "text/xml" | "image/svg+xml" => Some(MediaType::Xml),
            MARKDOWN_MIME_TYPE | "text/x-markdown" => Some(MediaType::Markdown),
            PLAIN_TEXT_MIME_TYPE | "text/csv" | "text/tab-separated-values" => Some(MediaType::PlainText),
            ZIP_MIME_TYPE | "application/x-zip-compressed" => Some(MediaType::Zip),
            _ => None,
        }
    }

    /// Best-effort media type from a filename or path, by extension.
    ///
    /// Uses the first-party extension table, falling back to the `mime_guess`
    /// database for extensions the table does not list. Returns `None` when
    /// the name carries no usable evidence; this is a *hint*, the sniffer
    /// decides.
    pub fn from_path(path: impl AsRef<Path>) -> Option<MediaType> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str()).map(|s| s.to_lowercase())?;

        if let Some(media) = EXT_TO_MEDIA.get(extension.as_str()) {
            return Some(*media);
        }

        mime_guess::from_path(path)
            .first()
            .and_then(|guess| MediaType::from_mime(guess.essence_str()))
    }

    /// Whether this type belongs to the text family (no binary signature
    /// exists; it is reached through the sniffer's text heuristic).
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            MediaType::Html | MediaType::Xml | MediaType::Markdown | MediaType::PlainText
        )
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}
