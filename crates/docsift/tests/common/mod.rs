//! In-memory fixture builders shared by the integration tests.
//!
//! Fixtures are generated rather than checked in: `lopdf` writes the PDFs
//! and `zip` writes the OOXML containers, so every test sees a well-formed
//! document without binary blobs in the repository.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// One-page PDF whose text layer contains `text`.
pub fn pdf_with_text(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// ZIP archive with the given (name, body) entries, stored uncompressed so
/// entry names land inside the sniff window the way real OOXML files do.
pub fn zip_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, body) in parts {
        writer.start_file(name.to_string(), options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Minimal well-formed DOCX containing `paragraphs` as separate paragraphs.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let runs: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        runs
    );
    zip_with_parts(&[("word/document.xml", document.as_str())])
}

/// Minimal well-formed PPTX with one slide per entry in `slides`.
pub fn pptx_with_slides(slides: &[&str]) -> Vec<u8> {
    let bodies: Vec<(String, String)> = slides
        .iter()
        .enumerate()
        .map(|(i, text)| {
            (
                format!("ppt/slides/slide{}.xml", i + 1),
                format!(
                    r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sld>"#,
                    text
                ),
            )
        })
        .collect();
    let parts: Vec<(&str, &str)> = bodies.iter().map(|(n, b)| (n.as_str(), b.as_str())).collect();
    zip_with_parts(&parts)
}

/// A container that sniffs as XLSX (has an `xl/` entry) but is unbound by
/// default.
pub fn xlsx_like_bytes() -> Vec<u8> {
    zip_with_parts(&[("xl/workbook.xml", "<workbook/>")])
}

/// A plain archive with no OOXML entry names.
pub fn plain_zip_bytes() -> Vec<u8> {
    zip_with_parts(&[("readme.txt", "hello from inside the archive")])
}
