//! Pagination — assembles the cover page and flowed content pages from a
//! plan and its portrait.
//!
//! Placement is a single pass with an overflow check before every block: if
//! the block's measured height does not fit in the page's remaining space, a
//! new page starts first. Blocks are never split. Section headers get the
//! same check before the first block of their section.

use crate::errors::AppError;
use crate::export::blocks::{plan_blocks, BlockKind, ContentBlock};
use crate::export::document::{
    Document, ElementContent, Page, PlacedElement, CONTENT_WIDTH_MM, MARGIN_MM, PAGE_HEIGHT_MM,
    PAGE_WIDTH_MM,
};
use crate::export::metrics::helvetica;
use crate::models::image::DecodedImage;
use crate::models::plan::CareerPlan;

const TITLE_FONT_PT: f32 = 26.0;
const INTRO_FONT_PT: f32 = 11.0;
/// Vertical advance per cover title line.
const TITLE_LINE_MM: f32 = 10.0;
/// Vertical advance per intro line.
const INTRO_LINE_MM: f32 = 5.0;
/// Advance consumed by a section header.
const HEADER_ADVANCE_MM: f32 = 8.0;
/// Room the roadmap header must find on the current page before the first
/// week block, or the page breaks.
const HEADER_RESERVE_MM: f32 = 25.0;
/// Gap between consecutive blocks.
const BLOCK_GAP_MM: f32 = 5.0;

pub const PROFILE_HEADER: &str = "Professional Profile";
pub const ROADMAP_HEADER: &str = "8-Week Roadmap";

/// Lays out the full document: cover, profile sections, weekly roadmap.
pub fn paginate(plan: &CareerPlan, portrait: &DecodedImage) -> Result<Document, AppError> {
    let (portrait_w, portrait_h) = portrait
        .png_dimensions()
        .ok_or_else(|| AppError::Export("portrait is not a decodable PNG".to_string()))?;

    let metrics = helvetica();
    let mut cursor = PageCursor::new();

    // Cover: title, intro, then the portrait filling the remaining height.
    let title_lines = metrics.wrap(&plan.career, TITLE_FONT_PT, CONTENT_WIDTH_MM);
    let title_height = 15.0 + title_lines.len() as f32 * TITLE_LINE_MM;
    cursor.place(title_height, ElementContent::Title { lines: title_lines });

    let intro_lines = metrics.wrap(&plan.intro, INTRO_FONT_PT, CONTENT_WIDTH_MM);
    let intro_height = intro_lines.len() as f32 * INTRO_LINE_MM + 15.0;
    cursor.place(intro_height, ElementContent::Paragraph { lines: intro_lines });

    let max_portrait_height = cursor.remaining_mm();
    if max_portrait_height > 0.0 {
        let (width_mm, height_mm) =
            fit_portrait(portrait_w, portrait_h, CONTENT_WIDTH_MM, max_portrait_height);
        let x_mm = (PAGE_WIDTH_MM - width_mm) / 2.0;
        cursor.place(height_mm, ElementContent::Portrait { x_mm, width_mm });
    }

    // Content pages: profile sections, then the weekly roadmap.
    cursor.new_page();
    place_header(&mut cursor, PROFILE_HEADER);
    let (profile, weeks): (Vec<ContentBlock>, Vec<ContentBlock>) = plan_blocks(plan)
        .into_iter()
        .partition(|block| !matches!(block.kind, BlockKind::Week(_)));
    for block in profile {
        place_block(&mut cursor, block);
    }

    if cursor.y_mm + HEADER_RESERVE_MM > PAGE_HEIGHT_MM - MARGIN_MM {
        cursor.new_page();
    } else {
        cursor.y_mm += BLOCK_GAP_MM;
    }
    place_header(&mut cursor, ROADMAP_HEADER);
    for block in weeks {
        place_block(&mut cursor, block);
    }

    Ok(Document {
        career: plan.career.clone(),
        pages: cursor.pages,
    })
}

/// Scales pixel dimensions into the given box, preserving aspect ratio.
fn fit_portrait(width_px: u32, height_px: u32, max_w_mm: f32, max_h_mm: f32) -> (f32, f32) {
    let mut width = max_w_mm;
    let mut height = width * height_px as f32 / width_px as f32;
    if height > max_h_mm {
        height = max_h_mm;
        width = height * width_px as f32 / height_px as f32;
    }
    (width, height)
}

fn place_header(cursor: &mut PageCursor, text: &str) {
    cursor.ensure_room(HEADER_ADVANCE_MM);
    cursor.place(
        HEADER_ADVANCE_MM,
        ElementContent::SectionHeader {
            text: text.to_string(),
        },
    );
}

fn place_block(cursor: &mut PageCursor, block: ContentBlock) {
    let height = block.height_mm();
    cursor.ensure_room(height);
    cursor.place(height, ElementContent::Block(block));
    cursor.y_mm += BLOCK_GAP_MM;
}

/// Walks pages top to bottom, breaking before anything that would overflow.
struct PageCursor {
    pages: Vec<Page>,
    y_mm: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y_mm: MARGIN_MM,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y_mm = MARGIN_MM;
    }

    fn remaining_mm(&self) -> f32 {
        PAGE_HEIGHT_MM - MARGIN_MM - self.y_mm
    }

    /// Starts a new page if an element of `height_mm` would cross the bottom
    /// margin. An element taller than a whole page is placed at the top of a
    /// fresh page and allowed to overrun rather than split.
    fn ensure_room(&mut self, height_mm: f32) {
        if self.y_mm + height_mm > PAGE_HEIGHT_MM - MARGIN_MM && self.y_mm > MARGIN_MM {
            self.new_page();
        }
    }

    fn place(&mut self, height_mm: f32, content: ElementContent) {
        let element = PlacedElement {
            y_mm: self.y_mm,
            height_mm,
            content,
        };
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
        self.y_mm += height_mm;
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use base64::Engine;

    use super::*;
    use crate::models::image::decode_data_url;
    use crate::models::plan::{LinkableItem, PlanWeek, PLAN_WEEKS};

    fn png_portrait(width: u32, height: u32) -> DecodedImage {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        let url = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&bytes));
        decode_data_url(&url).unwrap()
    }

    fn sample_plan(goals_per_week: usize) -> CareerPlan {
        CareerPlan {
            career: "Dragon Tamer".to_string(),
            is_fictional: true,
            intro: "A bold transition into professional dragon handling, \
                    built on patience, fireproofing, and enterprise-grade snacks."
                .to_string(),
            skills_to_develop: vec!["Calm assertiveness".to_string(), "Saddle repair".to_string()],
            thought_leaders: vec![LinkableItem {
                title: "Falkor".to_string(),
                url: String::new(),
            }],
            recommended_courses: vec![LinkableItem {
                title: "Advanced Wing Care".to_string(),
                url: String::new(),
            }],
            target_companies: vec![LinkableItem {
                title: "Wyvern & Sons".to_string(),
                url: String::new(),
            }],
            weeks: (1..=PLAN_WEEKS as u8)
                .map(|n| PlanWeek {
                    week_number: n,
                    theme: format!("Theme {n}"),
                    goals: (0..goals_per_week).map(|g| format!("Goal {n}.{g}")).collect(),
                    action_items: vec![format!("Action {n}")],
                })
                .collect(),
        }
    }

    fn block_kinds(document: &Document) -> Vec<BlockKind> {
        document
            .content_pages()
            .iter()
            .flat_map(|page| &page.elements)
            .filter_map(|element| match &element.content {
                ElementContent::Block(block) => Some(block.kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_cover_page_holds_title_intro_and_portrait() {
        let document = paginate(&sample_plan(1), &png_portrait(800, 600)).unwrap();
        let cover = &document.pages[0];
        assert!(matches!(
            cover.elements[0].content,
            ElementContent::Title { .. }
        ));
        assert!(matches!(
            cover.elements[1].content,
            ElementContent::Paragraph { .. }
        ));
        assert!(matches!(
            cover.elements[2].content,
            ElementContent::Portrait { .. }
        ));
    }

    #[test]
    fn test_portrait_is_centered_and_fits_remaining_space() {
        let document = paginate(&sample_plan(1), &png_portrait(800, 600)).unwrap();
        let cover = &document.pages[0];
        let portrait = cover.elements.last().unwrap();
        let ElementContent::Portrait { x_mm, width_mm } = portrait.content else {
            panic!("expected a portrait element");
        };
        assert!(width_mm <= CONTENT_WIDTH_MM + 1e-3);
        assert!((x_mm - (PAGE_WIDTH_MM - width_mm) / 2.0).abs() < 1e-3);
        assert!(portrait.y_mm + portrait.height_mm <= PAGE_HEIGHT_MM - MARGIN_MM + 1e-3);
    }

    #[test]
    fn test_tall_portrait_preserves_aspect_ratio() {
        // 1:2 portrait clamped by the remaining height, not the width.
        let document = paginate(&sample_plan(1), &png_portrait(500, 1000)).unwrap();
        let portrait = document.pages[0].elements.last().unwrap();
        let ElementContent::Portrait { width_mm, .. } = portrait.content else {
            panic!("expected a portrait element");
        };
        let ratio = portrait.height_mm / width_mm;
        assert!((ratio - 2.0).abs() < 1e-2, "aspect drifted to {ratio}");
        assert!(width_mm < CONTENT_WIDTH_MM);
    }

    #[test]
    fn test_blocks_keep_fixed_order_across_pages() {
        let document = paginate(&sample_plan(6), &png_portrait(800, 600)).unwrap();
        let kinds = block_kinds(&document);
        let mut expected = vec![
            BlockKind::Skills,
            BlockKind::Resources,
            BlockKind::ThoughtLeaders,
            BlockKind::TargetCompanies,
        ];
        expected.extend((1..=PLAN_WEEKS as u8).map(BlockKind::Week));
        assert_eq!(kinds, expected);
    }

    #[test]
    fn test_no_block_crosses_the_bottom_margin() {
        let document = paginate(&sample_plan(6), &png_portrait(800, 600)).unwrap();
        assert!(document.content_pages().len() > 1, "fixture should paginate");
        for page in document.content_pages() {
            for element in &page.elements {
                assert!(
                    element.y_mm + element.height_mm <= PAGE_HEIGHT_MM - MARGIN_MM + 1e-3,
                    "element at y={} height={} overflows",
                    element.y_mm,
                    element.height_mm
                );
            }
        }
    }

    #[test]
    fn test_every_page_starts_at_the_top_margin() {
        let document = paginate(&sample_plan(6), &png_portrait(800, 600)).unwrap();
        for page in &document.pages {
            let first = page.elements.first().unwrap();
            assert!((first.y_mm - MARGIN_MM).abs() < 1e-3);
        }
    }

    #[test]
    fn test_section_headers_precede_their_sections() {
        let document = paginate(&sample_plan(1), &png_portrait(800, 600)).unwrap();
        let headers: Vec<String> = document
            .content_pages()
            .iter()
            .flat_map(|page| &page.elements)
            .filter_map(|element| match &element.content {
                ElementContent::SectionHeader { text } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(headers, vec![PROFILE_HEADER, ROADMAP_HEADER]);

        // The profile header is the first element of the first content page.
        let first = &document.content_pages()[0].elements[0];
        assert!(matches!(
            &first.content,
            ElementContent::SectionHeader { text } if text == PROFILE_HEADER
        ));
    }

    #[test]
    fn test_non_png_portrait_is_an_export_error() {
        let portrait = DecodedImage {
            media_type: "image/png".to_string(),
            bytes: b"not a png at all".to_vec(),
        };
        let result = paginate(&sample_plan(1), &portrait);
        assert!(matches!(result, Err(AppError::Export(_))));
    }

    #[test]
    fn test_fit_portrait_clamps_to_width_for_landscape() {
        let (w, h) = fit_portrait(2000, 1000, 170.0, 200.0);
        assert!((w - 170.0).abs() < 1e-3);
        assert!((h - 85.0).abs() < 1e-3);
    }

    #[test]
    fn test_fit_portrait_clamps_to_height_for_tall_images() {
        let (w, h) = fit_portrait(1000, 2000, 170.0, 100.0);
        assert!((h - 100.0).abs() < 1e-3);
        assert!((w - 50.0).abs() < 1e-3);
    }
}
