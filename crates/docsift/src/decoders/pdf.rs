//! PDF text-layer decoding via `lopdf`.
//!
//! Extracts the text layer only. Rendering, layout reconstruction and OCR of
//! image-only pages are out of scope; a scanned PDF with no text layer
//! legitimately decodes to (near-)empty text.

use crate::decoder::Decoder;
use crate::error::{ExtractError, Result};
use crate::media::MediaType;
use async_trait::async_trait;
use lopdf::Document;

pub struct PdfDecoder;

impl PdfDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Decoder for PdfDecoder {
    fn name(&self) -> &str {
        "pdf-decoder"
    }

    fn media_types(&self) -> &[MediaType] {
        &[MediaType::Pdf]
    }

    async fn decode(&self, content: &[u8], media_type: MediaType) -> Result<String> {
        let document = Document::load_mem(content)
            .map_err(|e| ExtractError::decode_failed_with_source(media_type, "failed to parse PDF structure", e))?;

        if document.is_encrypted() {
            return Err(ExtractError::decode_failed(media_type, "document is password protected"));
        }

        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ExtractError::decode_failed(media_type, "document has no page tree"));
        }

        document
            .extract_text(&page_numbers)
            .map_err(|e| ExtractError::decode_failed_with_source(media_type, "failed to extract text layer", e))
    }
}
