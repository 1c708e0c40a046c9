//! Plain text and Markdown decoding.
//!
//! Both types carry their content literally, so one capability serves them:
//! a lossy UTF-8 view of the bytes. Markdown syntax is preserved as-is;
//! stripping it would lose semantic content.

use crate::decoder::Decoder;
use crate::error::Result;
use crate::media::MediaType;
use async_trait::async_trait;

pub struct TextDecoder;

impl TextDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Decoder for TextDecoder {
    fn name(&self) -> &str {
        "text-decoder"
    }

    fn media_types(&self) -> &[MediaType] {
        &[MediaType::PlainText, MediaType::Markdown]
    }

    async fn decode(&self, content: &[u8], _media_type: MediaType) -> Result<String> {
        Ok(String::from_utf8_lossy(content).into_owned())
    }
}
