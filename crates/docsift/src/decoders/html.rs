//! HTML decoding via `html-to-markdown-rs`.
//!
//! Markdown is the crate's text convention for markup formats: structure
//! (headings, lists, emphasis) survives as lightweight syntax instead of
//! being flattened away.

use crate::decoder::Decoder;
use crate::error::{ExtractError, Result};
use crate::media::MediaType;
use async_trait::async_trait;
use html_to_markdown_rs::convert;

pub struct HtmlDecoder;

impl HtmlDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Decoder for HtmlDecoder {
    fn name(&self) -> &str {
        "html-decoder"
    }

    fn media_types(&self) -> &[MediaType] {
        &[MediaType::Html]
    }

    async fn decode(&self, content: &[u8], media_type: MediaType) -> Result<String> {
        let html = String::from_utf8_lossy(content);
        convert(&html, None)
            .map_err(|e| ExtractError::decode_failed(media_type, format!("HTML conversion failed: {}", e)))
    }
}
