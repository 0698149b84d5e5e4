//! The pure paged-document model the paginator produces and writers consume.
//! All coordinates are millimetres from the top-left page corner.

#![allow(dead_code)]

use crate::export::blocks::ContentBlock;

/// A4 sheet dimensions.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Uniform page margin.
pub const MARGIN_MM: f32 = 20.0;
/// Usable width between the side margins.
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

/// A fully laid-out plan document: a cover page followed by content pages.
#[derive(Debug, Clone)]
pub struct Document {
    /// Career the document was exported for; drives the output file name.
    pub career: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages after the cover.
    pub fn content_pages(&self) -> &[Page] {
        self.pages.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub elements: Vec<PlacedElement>,
}

/// One element frozen onto a page by the paginator.
#[derive(Debug, Clone)]
pub struct PlacedElement {
    /// Top edge, mm from the page top.
    pub y_mm: f32,
    pub height_mm: f32,
    pub content: ElementContent,
}

#[derive(Debug, Clone)]
pub enum ElementContent {
    /// Cover title, centered over the content width.
    Title { lines: Vec<String> },
    /// Cover intro paragraph.
    Paragraph { lines: Vec<String> },
    SectionHeader { text: String },
    Block(ContentBlock),
    /// The portrait, scaled to fit and centered; `x_mm` from the left edge.
    Portrait { x_mm: f32, width_mm: f32 },
}

/// Deterministic output name: whitespace runs in the career collapse to one
/// underscore each.
pub fn plan_file_name(career: &str, extension: &str) -> String {
    let stem = career.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_Plan.{extension}")
}
