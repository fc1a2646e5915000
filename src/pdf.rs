use std::panic::{self, AssertUnwindSafe};

use lopdf::{Dictionary, Object, ObjectId};

use crate::error::Error;
use crate::model::{Metadata, Paragraph};

// US Letter, used when no MediaBox can be found.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

// Guards against cyclic /Parent chains in broken files.
const MAX_TREE_DEPTH: usize = 32;

pub struct PdfSource {
    doc: lopdf::Document,
    // (1-based page number, page object) in document order
    pages: Vec<(u32, ObjectId)>,
}

pub fn load(bytes: &[u8]) -> Result<PdfSource, Error> {
    let mut doc = lopdf::Document::load_mem(bytes)?;
    if doc.is_encrypted() {
        // Owner-password-only files open with the empty user password.
        doc.decrypt("").map_err(|e| {
            log::debug!("Empty user password rejected: {e}");
            Error::InvalidPdf("document is encrypted and requires a password".into())
        })?;
    }
    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    if pages.is_empty() {
        return Err(Error::InvalidPdf("document has no pages".into()));
    }
    Ok(PdfSource { doc, pages })
}

impl PdfSource {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page size in points for the zero-based page `index`.
    pub fn page_size(&self, index: usize) -> (f32, f32) {
        self.pages
            .get(index)
            .and_then(|&(_, id)| self.media_box(id))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Paragraphs recovered from the zero-based page `index`. Pages whose text
    /// cannot be decoded come back empty.
    pub fn page_paragraphs(&self, index: usize) -> Vec<Paragraph> {
        let Some(&(number, _)) = self.pages.get(index) else {
            return Vec::new();
        };
        match guarded(|| self.doc.extract_text(&[number])) {
            Ok(text) => split_paragraphs(&text),
            Err(e) => {
                log::warn!("Could not extract text from page {number}: {e}");
                Vec::new()
            }
        }
    }

    pub fn metadata(&self) -> Metadata {
        let info = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_dict().ok());
        let Some(info) = info else {
            return Metadata::default();
        };
        Metadata {
            title: self.info_string(info, b"Title"),
            author: self.info_string(info, b"Author"),
            subject: self.info_string(info, b"Subject"),
        }
    }

    fn media_box(&self, page_id: ObjectId) -> Option<(f32, f32)> {
        let mut id = page_id;
        for _ in 0..MAX_TREE_DEPTH {
            let dict = self.doc.get_dictionary(id).ok()?;
            if let Ok(obj) = dict.get(b"MediaBox") {
                return self.resolve(obj).and_then(rect_size);
            }
            id = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn info_string(&self, info: &Dictionary, key: &[u8]) -> Option<String> {
        let text = lopdf::decode_text_string(self.resolve(info.get(key).ok()?)?).ok()?;
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Runs a lopdf call, reporting a panic inside it as an error. Some malformed
/// objects trip lopdf's internal debug assertions.
fn guarded<T>(f: impl FnOnce() -> Result<T, lopdf::Error>) -> Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(_) => Err("malformed page content".into()),
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn rect_size(obj: &Object) -> Option<(f32, f32)> {
    let Object::Array(values) = obj else {
        return None;
    };
    let [x0, y0, x1, y1] = values.as_slice() else {
        return None;
    };
    let width = (number(x1)? - number(x0)?).abs();
    let height = (number(y1)? - number(y0)?).abs();
    (width > 0.0 && height > 0.0).then_some((width, height))
}

/// One paragraph per non-blank line, with whitespace runs collapsed and
/// characters that XML 1.0 cannot carry removed.
pub(crate) fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    text.lines()
        .map(|line| {
            line.split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .chars()
                .filter(|&c| is_xml_char(c))
                .collect::<String>()
        })
        .filter(|line| !line.is_empty())
        .map(|text| Paragraph { text })
        .collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
