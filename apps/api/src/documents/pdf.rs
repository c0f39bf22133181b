use lopdf::{Dictionary, Document, Object};
use tracing::warn;

use super::{DocumentError, Extracted};

/// Reads page text with `pdf-extract` and link URIs from the annotation dictionaries.
pub(crate) fn extract(bytes: &[u8]) -> Result<Extracted, DocumentError> {
    let doc = Document::load_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?;
    if doc.is_encrypted() {
        return Err(DocumentError::Pdf("document is encrypted".to_string()));
    }

    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?;

    let mut extracted = Extracted {
        text,
        links: Vec::new(),
    };
    for uri in link_uris(&doc) {
        extracted.push_link(&uri);
    }
    Ok(extracted)
}

/// Collects `/URI` targets of every `/Link` annotation, in page order.
fn link_uris(doc: &Document) -> Vec<String> {
    let mut uris = Vec::new();
    for (page_number, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            warn!("PDF page {page_number} is not a dictionary");
            continue;
        };
        let Ok(annots) = page.get(b"Annots") else {
            continue;
        };
        let Some(Object::Array(annots)) = resolve(doc, annots) else {
            continue;
        };
        for annot in annots {
            if let Some(Object::Dictionary(annot)) = resolve(doc, annot) {
                if let Some(uri) = link_uri(doc, annot) {
                    uris.push(uri);
                }
            }
        }
    }
    uris
}

fn link_uri(doc: &Document, annot: &Dictionary) -> Option<String> {
    match annot.get(b"Subtype").ok()? {
        Object::Name(name) if name.as_slice() == b"Link" => {}
        _ => return None,
    }
    let Some(Object::Dictionary(action)) = resolve(doc, annot.get(b"A").ok()?) else {
        return None;
    };
    match resolve(doc, action.get(b"URI").ok()?)? {
        Object::String(raw, _) => Some(String::from_utf8_lossy(raw).into_owned()),
        _ => None,
    }
}

/// Follows indirect references; `None` on a dangling reference.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    let mut current = object;
    // Bounded so a reference cycle cannot loop forever.
    for _ in 0..8 {
        match current {
            Object::Reference(id) => current = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}
