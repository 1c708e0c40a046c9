//! docsift — format-sniffing document text extraction.
//!
//! docsift answers one question well: *given arbitrary bytes, which decoder
//! should see them, and what text comes out?* It does this with three
//! explicit pieces instead of library auto-magic:
//!
//! - **Sniffer** (`sniff`): deterministic magic-byte classification into a
//!   closed [`MediaType`] set, with priority ordering and documented
//!   tie-breaks. Filenames are hints, never authority.
//! - **Decoder registry** (`registry`): media type → capability bindings,
//!   built at initialization, frozen afterwards. No globals.
//! - **Pipeline** (`pipeline`): sniff → resolve → decode → normalize, with
//!   typed failures for every way that can go wrong.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use docsift::{ExtractionConfig, Pipeline};
//!
//! # fn main() -> docsift::Result<()> {
//! let pipeline = Pipeline::with_default_decoders(ExtractionConfig::default())?;
//! let extraction = pipeline.extract_file_sync("leaflet.pdf")?;
//! println!("{}", extraction.text);
//! # Ok(())
//! # }
//! ```
//!
//! # Failure semantics
//!
//! Nothing recognizable decodes to a crash: unknown or unbound formats are
//! [`ExtractError::UnsupportedFormat`], malformed content is
//! [`ExtractError::DecodeFailed`] carrying the sniffed type and cause, and a
//! configured deadline turns a slow decode into [`ExtractError::Timeout`].
//! IO errors bubble up unchanged. The library never prints or logs errors;
//! presentation belongs to the caller.

#![deny(unsafe_code)]

pub mod config;
pub mod decoder;
pub mod decoders;
pub mod error;
pub mod io;
pub mod media;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod sniff;

pub use config::ExtractionConfig;
pub use decoder::Decoder;
pub use error::{ExtractError, Result};
pub use media::{
    MediaType, DOCX_MIME_TYPE, HTML_MIME_TYPE, MARKDOWN_MIME_TYPE, PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE,
    PPTX_MIME_TYPE, XLSX_MIME_TYPE, XML_MIME_TYPE, ZIP_MIME_TYPE,
};
pub use pipeline::{Extraction, Pipeline};
pub use registry::DecoderRegistry;
pub use sniff::{Sniffer, DEFAULT_SNIFF_LEN, MIN_SNIFF_LEN};
