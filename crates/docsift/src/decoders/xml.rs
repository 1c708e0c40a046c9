//! XML text decoding.
//!
//! Streams the document with `quick-xml` and collects character data,
//! discarding markup. Element boundaries become single spaces so adjacent
//! text runs do not fuse into one word.

use crate::decoder::Decoder;
use crate::error::{ExtractError, Result};
use crate::media::MediaType;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;

pub struct XmlDecoder;

impl XmlDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlDecoder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn xml_text(content: &[u8], media_type: MediaType) -> Result<String> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;

    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                let chunk = String::from_utf8_lossy(e.as_ref()).into_owned();
                push_separated(&mut text, &chunk);
            }
            Ok(Event::CData(e)) => {
                let chunk = String::from_utf8_lossy(e.as_ref()).into_owned();
                push_separated(&mut text, &chunk);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::decode_failed_with_source(
                    media_type,
                    format!("malformed XML at byte {}", reader.buffer_position()),
                    e,
                ));
            }
        }
        buf.clear();
    }

    Ok(text)
}

fn push_separated(out: &mut String, chunk: &str) {
    if chunk.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(chunk);
}

#[async_trait]
impl Decoder for XmlDecoder {
    fn name(&self) -> &str {
        "xml-decoder"
    }

    fn media_types(&self) -> &[MediaType] {
        &[MediaType::Xml]
    }

    async fn decode(&self, content: &[u8], media_type: MediaType) -> Result<String> {
        xml_text(content, media_type)
    }
}
