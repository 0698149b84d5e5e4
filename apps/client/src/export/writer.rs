//! Document writer — renders the paged model to a plain-text file, and saves
//! gallery portraits.
//!
//! The writer is deliberately dumb: every pagination decision is already
//! frozen in the `Document`, so rendering is a straight walk over placed
//! elements. Files land via a temp file renamed into place, so a failed
//! export never leaves a partial document behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::export::document::{plan_file_name, Document, ElementContent};
use crate::models::image::{decode_data_url, CareerImage};

/// File extension of the text rendition.
pub const DOCUMENT_EXTENSION: &str = "txt";

/// Writes the document into `dir` under its deterministic file name.
pub fn write_document(document: &Document, dir: &Path) -> Result<PathBuf, AppError> {
    let rendered = render_text(document);
    let path = dir.join(plan_file_name(&document.career, DOCUMENT_EXTENSION));
    write_atomic(dir, &path, rendered.as_bytes())?;
    Ok(path)
}

/// Saves a settled portrait into `dir` as `reimagined-<career>.<ext>`.
pub fn save_portrait(image: &CareerImage, dir: &Path) -> Result<PathBuf, AppError> {
    let file_name = image
        .download_file_name()
        .ok_or_else(|| AppError::Export("no portrait to download".to_string()))?;
    let decoded = decode_data_url(&image.image_url).map_err(AppError::Export)?;
    let path = dir.join(file_name);
    write_atomic(dir, &path, &decoded.bytes)?;
    Ok(path)
}

fn render_text(document: &Document) -> String {
    let mut out = String::new();
    for (index, page) in document.pages.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("==== Page {} ====\n\n", index + 1));
        for element in &page.elements {
            match &element.content {
                ElementContent::Title { lines } => {
                    for line in lines {
                        out.push_str(&format!("{line}\n"));
                    }
                    out.push('\n');
                }
                ElementContent::Paragraph { lines } => {
                    for line in lines {
                        out.push_str(&format!("{line}\n"));
                    }
                    out.push('\n');
                }
                ElementContent::SectionHeader { text } => {
                    out.push_str(&format!("{text}\n\n"));
                }
                ElementContent::Block(block) => {
                    out.push_str(&format!("{}\n", block.heading));
                    for line in &block.lines {
                        out.push_str(&format!("{line}\n"));
                    }
                    out.push('\n');
                }
                ElementContent::Portrait { width_mm, .. } => {
                    out.push_str(&format!(
                        "[portrait {:.0}x{:.0} mm]\n\n",
                        width_mm, element.height_mm
                    ));
                }
            }
        }
    }
    out
}

/// Writes bytes to a temp file in `dir` and renames it into place.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path)
        .map_err(|e| AppError::Export(format!("could not persist {}: {e}", path.display())))?;
    Ok(())
}
