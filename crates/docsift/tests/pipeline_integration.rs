//! End-to-end pipeline behavior: dispatch, failure taxonomy, deadlines,
//! reader replay, file entry points.

mod common;

use async_trait::async_trait;
use docsift::{
    Decoder, DecoderRegistry, ExtractError, ExtractionConfig, MediaType, Pipeline, Result,
};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

fn default_pipeline() -> Pipeline {
    Pipeline::with_default_decoders(ExtractionConfig::default()).unwrap()
}

#[tokio::test]
async fn plain_text_round_trips_modulo_line_endings() {
    let pipeline = default_pipeline();
    let extraction = pipeline
        .extract_bytes(b"first line\r\nsecond line\r\n", None)
        .await
        .unwrap();
    assert_eq!(extraction.media_type, MediaType::PlainText);
    assert_eq!(extraction.text, "first line\nsecond line\n");
}

#[tokio::test]
async fn zero_byte_input_is_unsupported() {
    let pipeline = default_pipeline();
    let err = pipeline.extract_bytes(b"", Some("empty.dat")).await.unwrap_err();
    match err {
        ExtractError::UnsupportedFormat { filename_hint, detected } => {
            assert_eq!(filename_hint.as_deref(), Some("empty.dat"));
            assert_eq!(detected, MediaType::Unknown);
        }
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
}

#[cfg(feature = "pdf")]
#[tokio::test]
async fn pdf_header_without_body_is_decode_failed_not_unsupported() {
    let pipeline = default_pipeline();
    let err = pipeline.extract_bytes(b"%PDF", None).await.unwrap_err();
    match err {
        ExtractError::DecodeFailed { media_type, .. } => assert_eq!(media_type, MediaType::Pdf),
        other => panic!("expected DecodeFailed, got {:?}", other),
    }
}

#[cfg(feature = "pdf")]
#[tokio::test]
async fn well_formed_pdf_extracts_known_content() {
    let pipeline = default_pipeline();
    let bytes = common::pdf_with_text("Acetylcysteine granules leaflet");
    let extraction = pipeline.extract_bytes(&bytes, None).await.unwrap();
    assert_eq!(extraction.media_type, MediaType::Pdf);
    assert!(extraction.text.contains("Acetylcysteine"), "got: {:?}", extraction.text);
}

#[cfg(feature = "office")]
#[tokio::test]
async fn well_formed_docx_extracts_known_content() {
    let pipeline = default_pipeline();
    let bytes = common::docx_with_paragraphs(&["Take one sachet daily.", "Dissolve in water."]);
    let extraction = pipeline.extract_bytes(&bytes, None).await.unwrap();
    assert_eq!(extraction.media_type, MediaType::Docx);
    assert!(extraction.text.contains("Take one sachet daily."));
    assert!(extraction.text.contains("Dissolve in water."));
}

#[cfg(feature = "office")]
#[tokio::test]
async fn truncated_docx_is_decode_failed_with_sniffed_type() {
    let pipeline = default_pipeline();
    let mut bytes = common::docx_with_paragraphs(&["will be truncated"]);
    bytes.truncate(bytes.len() / 2);
    let err = pipeline.extract_bytes(&bytes, None).await.unwrap_err();
    match err {
        ExtractError::DecodeFailed { media_type, .. } => assert_eq!(media_type, MediaType::Docx),
        other => panic!("expected DecodeFailed, got {:?}", other),
    }
}

#[cfg(feature = "office")]
#[tokio::test]
async fn well_formed_pptx_extracts_slides_in_order() {
    let pipeline = default_pipeline();
    let bytes = common::pptx_with_slides(&["Opening slide", "Closing slide"]);
    let extraction = pipeline.extract_bytes(&bytes, None).await.unwrap();
    assert_eq!(extraction.media_type, MediaType::Pptx);
    let open = extraction.text.find("Opening slide").unwrap();
    let close = extraction.text.find("Closing slide").unwrap();
    assert!(open < close);
}

#[cfg(feature = "html")]
#[tokio::test]
async fn html_decodes_to_text() {
    let pipeline = default_pipeline();
    let extraction = pipeline
        .extract_bytes(b"<!DOCTYPE html><html><body><p>patient information</p></body></html>", None)
        .await
        .unwrap();
    assert_eq!(extraction.media_type, MediaType::Html);
    assert!(extraction.text.contains("patient information"));
}

#[cfg(feature = "xml")]
#[tokio::test]
async fn xml_decodes_to_text() {
    let pipeline = default_pipeline();
    let extraction = pipeline
        .extract_bytes(b"<?xml version=\"1.0\"?><note><body>call tomorrow</body></note>", None)
        .await
        .unwrap();
    assert_eq!(extraction.media_type, MediaType::Xml);
    assert!(extraction.text.contains("call tomorrow"));
}

#[tokio::test]
async fn sniffable_but_unbound_type_is_unsupported() {
    let pipeline = default_pipeline();

    let err = pipeline
        .extract_bytes(&common::xlsx_like_bytes(), Some("report.xlsx"))
        .await
        .unwrap_err();
    match err {
        ExtractError::UnsupportedFormat { detected, filename_hint } => {
            assert_eq!(detected, MediaType::Xlsx);
            assert_eq!(filename_hint.as_deref(), Some("report.xlsx"));
        }
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }

    let err = pipeline.extract_bytes(&common::plain_zip_bytes(), None).await.unwrap_err();
    assert!(matches!(
        err,
        ExtractError::UnsupportedFormat {
            detected: MediaType::Zip,
            ..
        }
    ));
}

#[tokio::test]
async fn markdown_hint_refines_text_family_end_to_end() {
    let pipeline = default_pipeline();
    let extraction = pipeline
        .extract_bytes(b"# Dosage\n\nSee leaflet.\n", Some("dosage.md"))
        .await
        .unwrap();
    assert_eq!(extraction.media_type, MediaType::Markdown);
    assert!(extraction.text.contains("# Dosage"));
}

struct SlowDecoder {
    delay: Duration,
}

#[async_trait]
impl Decoder for SlowDecoder {
    fn name(&self) -> &str {
        "slow-decoder"
    }

    fn media_types(&self) -> &[MediaType] {
        &[MediaType::PlainText]
    }

    async fn decode(&self, _content: &[u8], _media_type: MediaType) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok("too late".to_string())
    }
}

#[tokio::test]
async fn deadline_turns_slow_decode_into_timeout() {
    let mut registry = DecoderRegistry::new();
    registry
        .register(Arc::new(SlowDecoder {
            delay: Duration::from_secs(5),
        }))
        .unwrap();
    let config = ExtractionConfig {
        timeout_ms: Some(20),
        ..Default::default()
    };
    let pipeline = Pipeline::new(registry, config);

    let err = pipeline.extract_bytes(b"some text", None).await.unwrap_err();
    match err {
        ExtractError::Timeout { media_type, elapsed } => {
            assert_eq!(media_type, MediaType::PlainText);
            assert!(elapsed >= Duration::from_millis(10));
            assert!(elapsed < Duration::from_secs(5));
        }
        other => panic!("expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn no_deadline_means_slow_decodes_complete() {
    let mut registry = DecoderRegistry::new();
    registry
        .register(Arc::new(SlowDecoder {
            delay: Duration::from_millis(30),
        }))
        .unwrap();
    let pipeline = Pipeline::new(registry, ExtractionConfig::default());

    let extraction = pipeline.extract_bytes(b"some text", None).await.unwrap();
    assert_eq!(extraction.text, "too late");
}

#[cfg(feature = "office")]
#[tokio::test]
async fn reader_source_replays_sniffed_prefix_to_decoder() {
    // A DOCX only decodes if the decoder sees the ZIP header the sniffer
    // consumed, so success here proves the prefix was replayed.
    let pipeline = default_pipeline();
    let bytes = common::docx_with_paragraphs(&["streamed content"]);
    let extraction = pipeline
        .extract_reader(Cursor::new(bytes), Some("streamed.docx"))
        .await
        .unwrap();
    assert_eq!(extraction.media_type, MediaType::Docx);
    assert!(extraction.text.contains("streamed content"));
}

#[tokio::test]
async fn reader_source_with_unknown_prefix_stops_early() {
    let pipeline = default_pipeline();
    let err = pipeline
        .extract_reader(Cursor::new(vec![0u8, 1, 2, 3]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
}

#[cfg(feature = "pdf")]
#[tokio::test]
async fn file_entry_point_uses_name_and_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaflet.pdf");
    std::fs::write(&path, common::pdf_with_text("file based extraction")).unwrap();

    let pipeline = default_pipeline();
    let extraction = pipeline.extract_file(&path).await.unwrap();
    assert_eq!(extraction.media_type, MediaType::Pdf);
    assert!(extraction.text.contains("file based extraction"));
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let pipeline = default_pipeline();
    let err = pipeline.extract_file("/nonexistent/leaflet.pdf").await.unwrap_err();
    assert!(matches!(err, ExtractError::Io(_)));
}

#[test]
fn sync_wrappers_mirror_async_results() {
    let pipeline = default_pipeline();
    let extraction = pipeline.extract_bytes_sync(b"sync text\r\n", None).unwrap();
    assert_eq!(extraction.text, "sync text\n");

    let err = pipeline.extract_bytes_sync(b"", None).unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
}
