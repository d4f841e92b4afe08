//! DOCX (Microsoft Word) extractor
//!
//! DOCX files are ZIP archives; the main content lives in
//! `word/document.xml` and embedded images are referenced from
//! `word/_rels/document.xml.rels`. Parsing is a manual ZIP + streaming XML
//! walk: body paragraphs are collected in order, tables become pipe-joined
//! cell rows, and each embedded image is routed through the OCR stack.
//!
//! Embedded-image failures degrade to an empty `image_text` with a warning
//! rather than failing the document.

use crate::traits::{ExtractOptions, Extractor};
use docharvest_core::{Document, ExtractError, ExtractionResult, FileKind};
use docharvest_ocr::{preprocess, OcrEngine};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Word document extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Extractor for DocxExtractor {
    fn kind(&self) -> FileKind {
        FileKind::Docx
    }

    fn extract(
        &self,
        doc: &Document,
        options: &ExtractOptions,
    ) -> Result<ExtractionResult, ExtractError> {
        let mut archive = ZipArchive::new(Cursor::new(doc.bytes.as_slice()))
            .map_err(|e| ExtractError::ParseFailure(format!("not a DOCX archive: {e}")))?;

        let document_xml = read_entry(&mut archive, "word/document.xml")?;
        let body = walk_document_xml(&document_xml)?;

        let image_text = if options.embedded_image_ocr {
            recognize_embedded_images(&mut archive, options)
        } else {
            Vec::new()
        };

        let mut result = ExtractionResult::with_content(body.paragraphs.join("\n"));
        result.set_meta("total_paragraphs", body.paragraphs.len());
        result.set_meta("total_tables", body.total_tables);
        result.tables = body.table_rows;
        result.image_text = image_text;
        Ok(result)
    }
}

/// Content collected from one pass over `word/document.xml`
#[derive(Debug, Default)]
struct DocumentBody {
    paragraphs: Vec<String>,
    table_rows: Vec<String>,
    total_tables: usize,
}

/// Streaming walk of the document body.
///
/// Paragraph text outside tables is collected per `w:p`; inside tables the
/// text accumulates into the current `w:tc` cell instead. Rows whose cells
/// are all empty are skipped.
fn walk_document_xml(xml: &[u8]) -> Result<DocumentBody, ExtractError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut body = DocumentBody::default();
    let mut table_depth = 0usize;
    let mut in_text = false;
    let mut para_buf = String::new();
    let mut cell_buf = String::new();
    let mut row_cells: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        body.total_tables += 1;
                    }
                }
                b"w:tr" if table_depth == 1 => row_cells.clear(),
                b"w:tc" if table_depth == 1 => cell_buf.clear(),
                b"w:p" if table_depth == 0 => para_buf.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::ParseFailure(format!("bad document text: {e}")))?;
                if table_depth == 0 {
                    para_buf.push_str(&text);
                } else {
                    cell_buf.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" if table_depth == 0 => {
                    let trimmed = para_buf.trim();
                    if !trimmed.is_empty() {
                        body.paragraphs.push(trimmed.to_string());
                    }
                }
                b"w:tc" if table_depth == 1 => {
                    row_cells.push(cell_buf.trim().to_string());
                }
                b"w:tr" if table_depth == 1 => {
                    if row_cells.iter().any(|cell| !cell.is_empty()) {
                        body.table_rows.push(row_cells.join(" | "));
                    }
                }
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::ParseFailure(format!(
                    "invalid document XML: {e}"
                )))
            }
        }
        buf.clear();
    }

    Ok(body)
}

/// OCR every image referenced from the document relationships.
///
/// All failures here are local: a missing relationships part, an unreadable
/// media entry, or a failed recognition pass each log a warning and the
/// remaining images are still processed.
fn recognize_embedded_images(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    options: &ExtractOptions,
) -> Vec<String> {
    let targets = match image_relationship_targets(archive) {
        Ok(targets) => targets,
        Err(e) => {
            log::warn!("could not extract embedded images: {e}");
            return Vec::new();
        }
    };

    let engine = OcrEngine::new(&options.ocr_language);
    let mut image_text = Vec::new();

    for target in targets {
        let bytes = match read_entry(archive, &target) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("could not read embedded image {target}: {e}");
                continue;
            }
        };
        match recognize_image_bytes(&engine, &bytes) {
            Ok(text) if !text.is_empty() => image_text.push(text),
            Ok(_) => {}
            Err(e) => log::warn!("could not process embedded image {target}: {e}"),
        }
    }

    image_text
}

fn recognize_image_bytes(engine: &OcrEngine, bytes: &[u8]) -> Result<String, ExtractError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ExtractError::ParseFailure(format!("could not load image: {e}")))?;
    let binary = preprocess(&decoded);
    engine
        .recognize_single_pass(&binary)
        .map_err(|e| ExtractError::OcrFailure(e.to_string()))
}

/// Image targets from `word/_rels/document.xml.rels`, resolved to archive
/// entry names.
fn image_relationship_targets(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
) -> Result<Vec<String>, ExtractError> {
    let rels = read_entry(archive, "word/_rels/document.xml.rels")?;

    let mut reader = Reader::from_reader(rels.as_slice());
    let mut buf = Vec::new();
    let mut targets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                if let Some(target) = image_target(&e) {
                    targets.push(target);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::ParseFailure(format!(
                    "invalid relationships XML: {e}"
                )))
            }
        }
        buf.clear();
    }

    Ok(targets)
}

/// Resolve a Relationship element to an archive entry name when it points
/// at an image.
fn image_target(element: &BytesStart<'_>) -> Option<String> {
    let mut rel_type = None;
    let mut target = None;
    for attr in element.attributes().flatten() {
        match attr.key.as_ref() {
            b"Type" => rel_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
            b"Target" => target = Some(String::from_utf8_lossy(&attr.value).to_string()),
            _ => {}
        }
    }

    if !rel_type.is_some_and(|t| t.ends_with("/image")) {
        return None;
    }

    // Targets are relative to word/ unless they start from the package root
    let target = target?;
    let trimmed = target.trim_start_matches('/');
    if trimmed.starts_with("word/") {
        Some(trimmed.to_string())
    } else {
        Some(format!("word/{trimmed}"))
    }
}

fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Vec<u8>, ExtractError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ExtractError::ParseFailure(format!("missing archive entry {name}: {e}")))?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| ExtractError::ParseFailure(format!("could not read {name}: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const DOC_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>
    <w:p><w:r><w:t>  </w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr>
        <w:tc><w:p><w:r><w:t></w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t></w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr>
        <w:tc><w:p><w:r><w:t>C</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>D</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
  </w:body>
</w:document>"#;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_and_tables() {
        let doc = Document::from_bytes("a.docx", FileKind::Docx, docx_bytes(DOC_XML));
        let options = ExtractOptions::default().with_embedded_image_ocr(false);
        let result = DocxExtractor::new().extract(&doc, &options).unwrap();

        assert_eq!(result.content, "First paragraph\nSecond paragraph");
        assert_eq!(result.tables, vec!["A | B", "C | D"]);
        assert_eq!(result.metadata["total_paragraphs"], 2);
        assert_eq!(result.metadata["total_tables"], 1);
    }

    #[test]
    fn test_missing_rels_degrades_to_empty_image_text() {
        let doc = Document::from_bytes("a.docx", FileKind::Docx, docx_bytes(DOC_XML));
        let options = ExtractOptions::default();
        let result = DocxExtractor::new().extract(&doc, &options).unwrap();
        assert!(result.image_text.is_empty());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_not_a_zip_is_parse_failure() {
        let doc = Document::from_bytes("a.docx", FileKind::Docx, b"plainly not a zip".to_vec());
        let err = DocxExtractor::new()
            .extract(&doc, &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExtractError::ParseFailure(_)));
    }

    #[test]
    fn test_image_target_resolution() {
        let mut start = BytesStart::new("Relationship");
        start.push_attribute((
            "Type",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image",
        ));
        start.push_attribute(("Target", "media/image1.png"));
        assert_eq!(
            image_target(&start),
            Some("word/media/image1.png".to_string())
        );

        let mut hyperlink = BytesStart::new("Relationship");
        hyperlink.push_attribute((
            "Type",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink",
        ));
        hyperlink.push_attribute(("Target", "https://example.com"));
        assert_eq!(image_target(&hyperlink), None);
    }
}
