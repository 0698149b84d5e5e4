//! Document export — turns a cached plan and its portrait into a paginated,
//! printable document.

pub mod blocks;
pub mod document;
pub mod metrics;
pub mod paginator;
pub mod writer;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::AppError;
use crate::models::image::decode_data_url;
use crate::models::plan::CareerPlan;

/// Exports `plan` with its portrait into `dir`. Best-effort: any failure is
/// reported as a one-shot notification upstream and nothing is written.
pub fn export_plan(
    plan: &CareerPlan,
    portrait_data_url: &str,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    let portrait = decode_data_url(portrait_data_url).map_err(AppError::Export)?;
    let document = paginator::paginate(plan, &portrait)?;
    let path = writer::write_document(&document, dir)?;
    info!(
        "Exported {}-page plan document to {}",
        document.page_count(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use base64::Engine;

    use super::*;
    use crate::models::plan::{LinkableItem, PlanWeek, PLAN_WEEKS};

    fn png_data_url(width: u32, height: u32) -> String {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&bytes))
    }

    fn sample_plan() -> CareerPlan {
        CareerPlan {
            career: "Space Ranger".to_string(),
            is_fictional: true,
            intro: "To infinity, professionally.".to_string(),
            skills_to_develop: vec!["Zero-g posture".to_string()],
            thought_leaders: vec![LinkableItem {
                title: "Buzz".to_string(),
                url: String::new(),
            }],
            recommended_courses: vec![],
            target_companies: vec![],
            weeks: (1..=PLAN_WEEKS as u8)
                .map(|n| PlanWeek {
                    week_number: n,
                    theme: format!("Theme {n}"),
                    goals: vec![format!("Goal {n}")],
                    action_items: vec![format!("Action {n}")],
                })
                .collect(),
        }
    }

    #[test]
    fn test_export_plan_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_plan(&sample_plan(), &png_data_url(640, 480), dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Space_Ranger_Plan.txt"
        );
    }

    #[test]
    fn test_export_plan_fails_cleanly_on_bad_portrait() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_plan(&sample_plan(), "data:image/png;base64,AAAA", dir.path());
        assert!(matches!(result, Err(AppError::Export(_))));
        assert!(
            std::fs::read_dir(dir.path()).unwrap().next().is_none(),
            "no partial document may be left behind"
        );
    }

    #[test]
    fn test_export_plan_rejects_non_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_plan(&sample_plan(), "https://example.com/a.png", dir.path());
        assert!(matches!(result, Err(AppError::Export(_))));
    }
}
