use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use super::{DocumentError, Extracted};

const DOCUMENT_PART: &str = "word/document.xml";
const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";

/// Reads paragraph text from the main document part and hyperlink targets
/// from its relationships part.
pub(crate) fn extract(bytes: &[u8]) -> Result<Extracted, DocumentError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let document = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| DocumentError::Docx(format!("missing {DOCUMENT_PART}")))?;
    let mut extracted = Extracted {
        text: paragraph_text(&document)?,
        links: Vec::new(),
    };

    // A document without hyperlinks may omit the relationships part entirely.
    if let Some(rels) = read_part(&mut archive, RELATIONSHIPS_PART)? {
        for target in hyperlink_targets(&rels)? {
            extracted.push_link(&target);
        }
    }
    Ok(extracted)
}

fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<String>, DocumentError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(DocumentError::Docx(e.to_string())),
    };
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(format!("{name}: {e}")))?;
    Ok(Some(xml))
}

/// One line per `w:p`; `w:tab` becomes a tab and `w:br`/`w:cr` a line break.
fn paragraph_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::Text(e)) if in_text => {
                let run = e.unescape().map_err(|err| DocumentError::Docx(err.to_string()))?;
                text.push_str(&run);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Docx(format!(
                    "XML error at position {}: {e}",
                    reader.error_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

/// `Target` of every relationship whose `Type` names a hyperlink.
fn hyperlink_targets(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut targets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.name().as_ref() == b"Relationship" =>
            {
                if attribute(&e, "Type")?.is_some_and(|t| t.ends_with("/hyperlink")) {
                    if let Some(target) = attribute(&e, "Target")? {
                        targets.push(target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocumentError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(targets)
}

fn attribute(element: &BytesStart, name: &str) -> Result<Option<String>, DocumentError> {
    let Some(attr) = element
        .try_get_attribute(name)
        .map_err(|e| DocumentError::Docx(e.to_string()))?
    else {
        return Ok(None);
    };
    let value = attr
        .unescape_value()
        .map_err(|e| DocumentError::Docx(e.to_string()))?;
    Ok(Some(value.into_owned()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Acme</w:t><w:tab/><w:t>Jan 2020 &amp; onwards</w:t></w:r></w:p>
    <w:p><w:hyperlink r:id="rId7"><w:r><w:t>GitHub</w:t></w:r></w:hyperlink></w:p>
  </w:body>
</w:document>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://github.com/jane?tab=repos&amp;x=1" TargetMode="External"/>
</Relationships>"#;

    fn build_docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let text = paragraph_text(BODY).unwrap();
        assert_eq!(text, "Jane Doe\n\nAcme\tJan 2020 & onwards\nGitHub\n");
    }

    #[test]
    fn test_only_hyperlink_relationships_are_kept() {
        let targets = hyperlink_targets(RELS).unwrap();
        assert_eq!(targets, vec!["https://github.com/jane?tab=repos&x=1".to_string()]);
    }

    #[test]
    fn test_docx_text_is_followed_by_links() {
        let bytes = build_docx(&[(DOCUMENT_PART, BODY), (RELATIONSHIPS_PART, RELS)]);
        let text = crate::documents::extract_text(&bytes, "cv.docx").unwrap();
        assert!(text.starts_with("Jane Doe\n"));
        assert!(text.ends_with("GitHub\n\nhttps://github.com/jane?tab=repos&x=1"));
    }

    #[test]
    fn test_missing_relationships_part_is_fine() {
        let bytes = build_docx(&[(DOCUMENT_PART, BODY)]);
        let extracted = extract(&bytes).unwrap();
        assert!(extracted.links.is_empty());
    }

    #[test]
    fn test_archive_without_document_part_is_rejected() {
        let bytes = build_docx(&[("docProps/core.xml", "<coreProperties/>")]);
        assert!(matches!(extract(&bytes), Err(DocumentError::Docx(_))));
    }

    #[test]
    fn test_non_zip_bytes_are_rejected() {
        assert!(matches!(extract(b"plain text"), Err(DocumentError::Docx(_))));
    }
}
