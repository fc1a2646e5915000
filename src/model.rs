#[derive(Debug, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

pub struct Document {
    pub metadata: Metadata,
    pub pages: Vec<Page>,
}

pub struct Page {
    pub width: f32,  // points
    pub height: f32, // points
    pub paragraphs: Vec<Paragraph>,
}

pub struct Paragraph {
    pub text: String,
}

/// Zero-based page range with an exclusive end. `end: None` runs through the
/// last page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl PageRange {
    pub fn all() -> Self {
        PageRange { start: 0, end: None }
    }

    /// Clamps `end` to the document and returns the concrete bounds, or
    /// `None` when the range selects no pages.
    pub fn resolve(&self, page_count: usize) -> Option<(usize, usize)> {
        let end = self.end.map_or(page_count, |e| e.min(page_count));
        (self.start < end).then_some((self.start, end))
    }
}

impl Default for PageRange {
    fn default() -> Self {
        PageRange::all()
    }
}
