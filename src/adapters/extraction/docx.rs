//! Word-processor (`.docx`) strategy
//!
//! Reads `word/document.xml` from the OOXML zip container and joins paragraph
//! texts with `\n`. Inside a paragraph, `<w:tab/>` becomes `\t` and
//! `<w:br/>`/`<w:cr/>` become `\n`.

use super::ExtractionStrategy;
use crate::domain::{DocumentKind, ExtractionError, RawDocument, StrategyKind};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph extraction from `.docx` bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxStrategy;

#[async_trait]
impl ExtractionStrategy for DocxStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Docx
    }

    fn applies_to(&self, kind: DocumentKind) -> bool {
        kind == DocumentKind::Docx
    }

    async fn extract(&self, document: &RawDocument) -> Result<String, ExtractionError> {
        let xml = read_document_part(document.bytes())?;
        let paragraphs = paragraphs_from_xml(&xml)?;
        Ok(paragraphs.join("\n"))
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Malformed(format!("not a zip container: {e}")))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Malformed(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Malformed(format!("unreadable {DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

/// Collect paragraph texts in document order
///
/// Paragraphs nested in text boxes are emitted before the paragraph that
/// anchors them.
pub fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;
    // `<w:tabs>` in paragraph properties declares tab stops, not tab characters
    let mut in_tab_stops = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" => in_text = true,
                b"tabs" => in_tab_stops = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" if !in_tab_stops => push_to(&mut open, "\t"),
                b"br" | b"cr" => push_to(&mut open, "\n"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractionError::Malformed(format!("bad text run: {err}")))?;
                push_to(&mut open, &text);
            }
            Ok(Event::CData(e)) if in_text => {
                push_to(&mut open, &String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                b"t" => in_text = false,
                b"tabs" => in_tab_stops = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Malformed(format!(
                    "invalid XML at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_to(open: &mut [String], text: &str) {
    if let Some(current) = open.last_mut() {
        current.push_str(text);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build a minimal `.docx` around a `<w:body>` fragment
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("[Content_Types].xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<Types/>").unwrap();
            writer
                .start_file(DOCUMENT_PART, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_paragraphs_joined_by_newline() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Social Security Number: </w:t></w:r><w:r><w:t>123-45-6789</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Name: Alice</w:t></w:r></w:p>",
        );
        let doc = RawDocument::new(bytes, "form.docx");

        let text = DocxStrategy.extract(&doc).await.unwrap();
        assert_eq!(text, "Social Security Number: 123-45-6789\nName: Alice");
    }

    #[test]
    fn test_tabs_breaks_and_empty_paragraphs() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t xml:space="preserve"> D &amp; E </w:t></w:r></w:p>
        </w:body></w:document>"#;

        let paragraphs = paragraphs_from_xml(xml).unwrap();
        assert_eq!(paragraphs, vec!["A\tB\nC", "", " D & E "]);
    }

    #[test]
    fn test_tab_stop_definitions_ignored() {
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Name</w:t><w:tab/><w:t>Alice</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(paragraphs_from_xml(xml).unwrap(), vec!["Name\tAlice"]);
    }

    #[test]
    fn test_text_outside_runs_ignored() {
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p>stray<w:r><w:t>kept</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(paragraphs_from_xml(xml).unwrap(), vec!["kept"]);
    }

    #[tokio::test]
    async fn test_not_a_zip_is_malformed() {
        let doc = RawDocument::new(b"plain bytes".to_vec(), "broken.docx");
        let err = DocxStrategy.extract(&doc).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_missing_document_part_is_malformed() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("other.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = read_document_part(buf.get_ref()).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_PART));
    }
}
