//! The decoder capability trait.
//!
//! Decoders are the sole plugin boundary of the crate: a function-shaped
//! contract from the bytes of a known format to extracted text. The built-in
//! implementations under [`crate::decoders`] delegate to format crates; new
//! formats are added by registering another implementation, no core changes.

use crate::error::Result;
use crate::media::MediaType;
use async_trait::async_trait;

/// An extraction capability for one or more media types.
///
/// # Contract
///
/// - `decode` receives the *full* input, including any prefix the sniffer
///   looked at, and returns the extracted text without normalization (the
///   pipeline owns BOM/line-ending cleanup).
/// - Errors must come back as [`crate::ExtractError`] values; a decoder must
///   not panic on malformed input.
/// - Implementations must be `Send + Sync`; the pipeline calls them
///   concurrently from multiple tasks.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use docsift::{Decoder, MediaType, Result};
///
/// struct UpperDecoder;
///
/// #[async_trait]
/// impl Decoder for UpperDecoder {
///     fn name(&self) -> &str {
///         "upper-decoder"
///     }
///
///     fn media_types(&self) -> &[MediaType] {
///         &[MediaType::PlainText]
///     }
///
///     async fn decode(&self, content: &[u8], _media_type: MediaType) -> Result<String> {
///         Ok(String::from_utf8_lossy(content).to_uppercase())
///     }
/// }
/// ```
#[async_trait]
pub trait Decoder: Send + Sync {
    /// Unique identifier, kebab-case by convention.
    fn name(&self) -> &str;

    /// Media types this capability can decode. The registry binds the
    /// decoder under every listed type.
    fn media_types(&self) -> &[MediaType];

    /// Decode document bytes into text.
    ///
    /// `media_type` is the sniffed (or caller-asserted) type, always one of
    /// [`Decoder::media_types`]; decoders bound under several types use it
    /// to dispatch internally.
    async fn decode(&self, content: &[u8], media_type: MediaType) -> Result<String>;
}
