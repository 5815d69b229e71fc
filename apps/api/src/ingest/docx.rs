//! DOCX text extraction.
//!
//! Reads `word/document.xml` out of the OOXML zip container and emits every
//! body paragraph followed by a newline. Paragraphs inside tables are not
//! body paragraphs and are skipped.

use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::IngestError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract<R: Read + Seek>(source: &mut R) -> Result<String, IngestError> {
    let mut archive = zip::ZipArchive::new(source)?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    paragraphs_to_text(&xml)
}

/// Walks the WordprocessingML body. Element matching uses local names so the
/// `w:` prefix binding does not matter.
pub fn paragraphs_to_text(xml: &str) -> Result<String, IngestError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut paragraph = String::new();

    let mut table_depth = 0usize;
    // Block-level content controls; their paragraphs are not body children.
    let mut block_sdt_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| IngestError::Xml(e.to_string()))?;

        // Only text in a direct body paragraph counts.
        let at_body_level = table_depth == 0 && block_sdt_depth == 0;
        let collecting = at_body_level && paragraph_depth == 1;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"sdt" if paragraph_depth == 0 => block_sdt_depth += 1,
                b"p" => paragraph_depth += 1,
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                // `<w:tab/>` inside `<w:tabs>` is a tab stop, not a character.
                b"tab" if collecting && run_depth > 0 => paragraph.push('\t'),
                b"br" | b"cr" if collecting && run_depth > 0 => paragraph.push('\n'),
                b"p" if at_body_level && paragraph_depth == 0 => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text && collecting => {
                let text = t.unescape().map_err(|e| IngestError::Xml(e.to_string()))?;
                paragraph.push_str(&text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"sdt" if paragraph_depth == 0 => {
                    block_sdt_depth = block_sdt_depth.saturating_sub(1)
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" => {
                    if collecting {
                        out.push_str(&paragraph);
                        out.push('\n');
                        paragraph.clear();
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn wrap_body(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    /// Builds a minimal DOCX whose body holds one run per paragraph.
    pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        zip_document_xml(&wrap_body(&body))
    }

    pub(crate) fn zip_document_xml(xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut cursor);
            zip.start_file(DOCUMENT_PART, zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_paragraphs_each_end_with_newline() {
        let mut cursor = Cursor::new(build_docx(&["Alpha.", "Beta."]));
        assert_eq!(extract(&mut cursor).unwrap(), "Alpha.\nBeta.\n");
    }

    #[test]
    fn test_runs_are_joined_within_a_paragraph() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>world</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs_to_text(&xml).unwrap(), "Hello world\n");
    }

    #[test]
    fn test_empty_paragraph_still_emits_newline() {
        let xml = wrap_body("<w:p><w:r><w:t>One</w:t></w:r></w:p><w:p/><w:p></w:p>");
        assert_eq!(paragraphs_to_text(&xml).unwrap(), "One\n\n\n");
    }

    #[test]
    fn test_tabs_and_breaks_inside_runs() {
        let xml = wrap_body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs_to_text(&xml).unwrap(), "a\tb\nc\n");
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let xml = wrap_body(
            "<w:p><w:r><w:t>Before</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>After</w:t></w:r></w:p>",
        );
        assert_eq!(paragraphs_to_text(&xml).unwrap(), "Before\nAfter\n");
    }

    #[test]
    fn test_block_content_control_paragraphs_are_skipped() {
        let xml = wrap_body(
            "<w:p><w:r><w:t>Before</w:t></w:r></w:p>\
             <w:sdt><w:sdtPr><w:alias w:val=\"Cover\"/></w:sdtPr><w:sdtContent>\
             <w:p><w:r><w:t>Inside</w:t></w:r></w:p><w:p/>\
             </w:sdtContent></w:sdt>\
             <w:p><w:r><w:t>After</w:t></w:r></w:p>",
        );
        assert_eq!(paragraphs_to_text(&xml).unwrap(), "Before\nAfter\n");
    }

    #[test]
    fn test_inline_content_control_inside_paragraph_is_not_a_block() {
        let xml = wrap_body(
            "<w:p><w:sdt><w:sdtContent><w:r><w:t>Field</w:t></w:r></w:sdtContent></w:sdt></w:p>\
             <w:p><w:r><w:t>Next</w:t></w:r></w:p>",
        );
        assert_eq!(paragraphs_to_text(&xml).unwrap(), "Field\nNext\n");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = wrap_body("<w:p><w:r><w:t>R&amp;D &lt;team&gt;</w:t></w:r></w:p>");
        assert_eq!(paragraphs_to_text(&xml).unwrap(), "R&D <team>\n");
    }

    #[test]
    fn test_missing_document_part_is_an_error() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut cursor);
            zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"<x/>").unwrap();
            zip.finish().unwrap();
        }
        cursor.set_position(0);
        assert!(matches!(extract(&mut cursor), Err(IngestError::Zip(_))));
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        let mut cursor = Cursor::new(b"plain text".to_vec());
        assert!(extract(&mut cursor).is_err());
    }
}
