//! Built-in decoders.
//!
//! One module per format family, each delegating the actual parsing to its
//! format crate. [`register_default_decoders`] binds everything the enabled
//! features provide; `Xlsx` and `Zip` stay deliberately unbound, exercising
//! the pipeline's unsupported-format fallback (spreadsheet and archive
//! traversal support would slot in the same way).

use crate::error::Result;
use crate::registry::DecoderRegistry;
use std::sync::Arc;

pub mod text;

#[cfg(feature = "html")]
pub mod html;

#[cfg(feature = "office")]
pub mod ooxml;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "xml")]
pub mod xml;

pub use text::TextDecoder;

#[cfg(feature = "html")]
pub use html::HtmlDecoder;

#[cfg(feature = "office")]
pub use ooxml::{DocxDecoder, PptxDecoder};

#[cfg(feature = "pdf")]
pub use pdf::PdfDecoder;

#[cfg(feature = "xml")]
pub use xml::XmlDecoder;

/// Register every built-in decoder enabled by the crate's features.
pub fn register_default_decoders(registry: &mut DecoderRegistry) -> Result<()> {
    registry.register(Arc::new(TextDecoder::new()))?;

    #[cfg(feature = "xml")]
    registry.register(Arc::new(XmlDecoder::new()))?;

    #[cfg(feature = "html")]
    registry.register(Arc::new(HtmlDecoder::new()))?;

    #[cfg(feature = "pdf")]
    registry.register(Arc::new(PdfDecoder::new()))?;

    #[cfg(feature = "office")]
    {
        registry.register(Arc::new(DocxDecoder::new()))?;
        registry.register(Arc::new(PptxDecoder::new()))?;
    }

    Ok(())
}
