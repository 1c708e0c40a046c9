//! OOXML (DOCX, PPTX) decoding: ZIP container plus streaming XML.
//!
//! Both formats store text in `<w:t>`/`<a:t>` runs inside part files of a
//! ZIP archive. The collector below works on local names, so it serves
//! WordprocessingML and DrawingML alike: `t` runs accumulate, `p` ends
//! become newlines, explicit breaks and tabs map to their characters.

use crate::decoder::Decoder;
use crate::error::{ExtractError, Result};
use crate::media::MediaType;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Collect document text from one OOXML part (e.g. `word/document.xml`).
fn part_text(xml: &[u8], media_type: MediaType) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().check_end_names = false;

    let mut text = String::new();
    let mut in_run = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().local_name().as_ref() == b"t" {
                    in_run = true;
                }
            }
            Ok(Event::End(e)) => match e.name().local_name().as_ref() {
                b"t" => in_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().local_name().as_ref() {
                b"br" | b"cr" => text.push('\n'),
                b"tab" => text.push('\t'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_run {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::decode_failed_with_source(
                    media_type,
                    format!("malformed part XML at byte {}", reader.buffer_position()),
                    e,
                ));
            }
        }
        buf.clear();
    }

    Ok(text)
}

fn open_archive(content: &[u8], media_type: MediaType) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(content))
        .map_err(|e| ExtractError::decode_failed_with_source(media_type, "failed to open OOXML container", e))
}

fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
    media_type: MediaType,
) -> Result<Vec<u8>> {
    let mut part = archive
        .by_name(name)
        .map_err(|e| ExtractError::decode_failed_with_source(media_type, format!("missing part '{}'", name), e))?;

    let mut xml = Vec::new();
    part.read_to_end(&mut xml)
        .map_err(|e| ExtractError::decode_failed_with_source(media_type, format!("corrupt part '{}'", name), e))?;
    Ok(xml)
}

/// Word document decoder: text of `word/document.xml`.
pub struct DocxDecoder;

impl DocxDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Decoder for DocxDecoder {
    fn name(&self) -> &str {
        "docx-decoder"
    }

    fn media_types(&self) -> &[MediaType] {
        &[MediaType::Docx]
    }

    async fn decode(&self, content: &[u8], media_type: MediaType) -> Result<String> {
        let mut archive = open_archive(content, media_type)?;
        let xml = read_part(&mut archive, "word/document.xml", media_type)?;
        part_text(&xml, media_type)
    }
}

/// Presentation decoder: slide texts in slide order, blank-line separated.
pub struct PptxDecoder;

impl PptxDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PptxDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Slide index parsed from `ppt/slides/slideN.xml`, for ordering.
fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix("ppt/slides/slide")?.strip_suffix(".xml")?.parse().ok()
}

#[async_trait]
impl Decoder for PptxDecoder {
    fn name(&self) -> &str {
        "pptx-decoder"
    }

    fn media_types(&self) -> &[MediaType] {
        &[MediaType::Pptx]
    }

    async fn decode(&self, content: &[u8], media_type: MediaType) -> Result<String> {
        let mut archive = open_archive(content, media_type)?;

        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
            .collect();
        slides.sort();

        if slides.is_empty() {
            return Err(ExtractError::decode_failed(media_type, "presentation has no slides"));
        }

        let mut parts = Vec::with_capacity(slides.len());
        for (_, name) in &slides {
            let xml = read_part(&mut archive, name, media_type)?;
            parts.push(part_text(&xml, media_type)?);
        }

        Ok(parts.join("\n"))
    }
}
