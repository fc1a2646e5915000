#[cfg(feature = "cli")]
pub mod cli;
mod converter;
mod docx;
mod error;
mod model;
mod pdf;

pub use converter::{Backend, Conversion, Converter, PdfBackend};
pub use error::Error;
pub use model::PageRange;

use std::path::Path;

/// Converts every page of `input` into a DOCX written at `output`.
pub fn convert_pdf_to_docx(input: &Path, output: &Path) -> Result<(), Error> {
    let mut converter = Converter::open(input)?;
    let result = converter.convert(output, PageRange::all());
    converter.close();
    result
}
