use std::path::{Path, PathBuf};

use crate::docx;
use crate::error::Error;
use crate::model::{Document, Page, PageRange};
use crate::pdf::{self, PdfSource};

/// An open conversion handle bound to one input document.
pub trait Conversion {
    fn convert(&mut self, output: &Path, range: PageRange) -> Result<(), Error>;

    /// Releases whatever the handle holds. Must be safe to call more than once.
    fn close(&mut self);
}

/// Opens conversion handles. The CLI is written against this so that the
/// PDF engine can be swapped for a recording double in tests.
pub trait Backend {
    type Handle: Conversion;

    fn open(&self, input: &Path) -> Result<Self::Handle, Error>;
}

/// The built-in PDF to DOCX engine.
pub struct PdfBackend;

impl Backend for PdfBackend {
    type Handle = Converter;

    fn open(&self, input: &Path) -> Result<Converter, Error> {
        Converter::open(input)
    }
}

pub struct Converter {
    input: PathBuf,
    source: Option<PdfSource>,
}

impl Converter {
    pub fn open(input: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(input)?;
        let source = pdf::load(&bytes)?;
        log::debug!(
            "Opened {} ({} pages)",
            input.display(),
            source.page_count()
        );
        Ok(Converter {
            input: input.to_path_buf(),
            source: Some(source),
        })
    }

    pub fn page_count(&self) -> usize {
        self.source.as_ref().map_or(0, PdfSource::page_count)
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    fn build(&self, range: PageRange) -> Result<Document, Error> {
        let source = self.source.as_ref().ok_or(Error::Closed)?;
        let page_count = source.page_count();
        let (start, end) = range.resolve(page_count).ok_or(Error::PageRange {
            start: range.start,
            end: range.end,
            page_count,
        })?;

        let pages: Vec<Page> = (start..end)
            .map(|index| {
                let (width, height) = source.page_size(index);
                Page {
                    width,
                    height,
                    paragraphs: source.page_paragraphs(index),
                }
            })
            .collect();
        let paragraph_count: usize = pages.iter().map(|p| p.paragraphs.len()).sum();
        log::info!(
            "Converting pages {}..{} of {}: {paragraph_count} paragraphs",
            start + 1,
            end,
            self.input.display()
        );
        if paragraph_count == 0 {
            log::warn!(
                "No text recovered from {}; output will contain empty pages",
                self.input.display()
            );
        }

        Ok(Document {
            metadata: source.metadata(),
            pages,
        })
    }
}

impl Conversion for Converter {
    fn convert(&mut self, output: &Path, range: PageRange) -> Result<(), Error> {
        let doc = self.build(range)?;
        let bytes = docx::render(&doc)?;
        std::fs::write(output, bytes).map_err(Error::Io)
    }

    fn close(&mut self) {
        if self.source.take().is_some() {
            log::debug!("Closed {}", self.input.display());
        }
    }
}

impl Drop for Converter {
    fn drop(&mut self) {
        self.close();
    }
}
