use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidPdf(String),
    PageRange { start: usize, end: Option<usize>, page_count: usize },
    Closed,
    Pdf(lopdf::Error),
    Zip(zip::result::ZipError),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPdf(reason) => write!(f, "not a valid PDF file: {reason}"),
            Error::PageRange { start, end: Some(end), page_count } => write!(
                f,
                "page range {start}..{end} is outside a document of {page_count} page(s)"
            ),
            Error::PageRange { start, end: None, page_count } => write!(
                f,
                "start page {start} is outside a document of {page_count} page(s)"
            ),
            Error::Closed => write!(f, "converter has already been closed"),
            Error::Pdf(e) => write!(f, "PDF error: {e}"),
            Error::Zip(e) => write!(f, "ZIP error: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<lopdf::Error> for Error {
    fn from(e: lopdf::Error) -> Self {
        Error::Pdf(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
