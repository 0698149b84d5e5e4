//! Content blocks — the fixed sequence of sections a plan renders into.
//!
//! Each block is measured independently and is never split across pages.
//! Order is fixed: skills, resources, thought leaders, target companies,
//! then one block per week.

use crate::export::document::CONTENT_WIDTH_MM;
use crate::export::metrics::helvetica;
use crate::models::plan::{CareerPlan, PlanWeek};

/// Body font size for block text.
pub const BODY_FONT_PT: f32 = 11.0;
/// Vertical advance per body line.
pub const BODY_LINE_MM: f32 = 5.0;
/// Frame padding under each block's content.
const BLOCK_PAD_MM: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Skills,
    Resources,
    ThoughtLeaders,
    TargetCompanies,
    Week(u8),
}

/// One rasterized-to-lines content block with its heading.
#[derive(Debug, Clone)]
pub struct ContentBlock {
    pub kind: BlockKind,
    pub heading: String,
    pub lines: Vec<String>,
}

impl ContentBlock {
    /// Rendered height: heading line plus body lines plus padding.
    pub fn height_mm(&self) -> f32 {
        (self.lines.len() as f32 + 1.0) * BODY_LINE_MM + BLOCK_PAD_MM
    }
}

/// Builds the export blocks for a plan in their fixed order.
pub fn plan_blocks(plan: &CareerPlan) -> Vec<ContentBlock> {
    let mut blocks = Vec::with_capacity(4 + plan.weeks.len());
    blocks.push(skills_block(plan));
    blocks.push(resources_block(plan));
    blocks.push(leaders_block(plan));
    blocks.push(companies_block(plan));
    for week in &plan.weeks {
        blocks.push(week_block(week));
    }
    blocks
}

fn wrapped(text: &str) -> Vec<String> {
    helvetica().wrap(text, BODY_FONT_PT, CONTENT_WIDTH_MM)
}

fn bulleted(items: impl Iterator<Item = String>) -> Vec<String> {
    items.flat_map(|item| wrapped(&format!("- {item}"))).collect()
}

fn skills_block(plan: &CareerPlan) -> ContentBlock {
    ContentBlock {
        kind: BlockKind::Skills,
        heading: "Key Skills".to_string(),
        lines: bulleted(plan.skills_to_develop.iter().cloned()),
    }
}

/// Courses render as a title line followed by the link, so the fallback
/// search URL shows up for items the service returned without one.
fn resources_block(plan: &CareerPlan) -> ContentBlock {
    let lines = plan
        .recommended_courses
        .iter()
        .flat_map(|course| {
            let mut lines = wrapped(&format!("- {}", course.title));
            lines.extend(wrapped(&format!("  {}", course.resolved_url())));
            lines
        })
        .collect();
    ContentBlock {
        kind: BlockKind::Resources,
        heading: "Learn From".to_string(),
        lines,
    }
}

fn leaders_block(plan: &CareerPlan) -> ContentBlock {
    ContentBlock {
        kind: BlockKind::ThoughtLeaders,
        heading: "Network & Thought Leaders".to_string(),
        lines: bulleted(plan.thought_leaders.iter().map(|l| l.title.clone())),
    }
}

fn companies_block(plan: &CareerPlan) -> ContentBlock {
    ContentBlock {
        kind: BlockKind::TargetCompanies,
        heading: "Target Companies".to_string(),
        lines: bulleted(plan.target_companies.iter().map(|c| c.title.clone())),
    }
}

fn week_block(week: &PlanWeek) -> ContentBlock {
    let mut lines = Vec::new();
    lines.push("Key Goals:".to_string());
    lines.extend(bulleted(week.goals.iter().cloned()));
    lines.push("Action Items:".to_string());
    lines.extend(bulleted(week.action_items.iter().cloned()));
    ContentBlock {
        kind: BlockKind::Week(week.week_number),
        heading: format!("Week {}: {}", week.week_number, week.theme),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{LinkableItem, PLAN_WEEKS};

    fn sample_plan() -> CareerPlan {
        CareerPlan {
            career: "CEO".to_string(),
            is_fictional: false,
            intro: "Intro.".to_string(),
            skills_to_develop: vec!["Leadership".to_string(), "Delegation".to_string()],
            thought_leaders: vec![LinkableItem {
                title: "Jane Doe".to_string(),
                url: String::new(),
            }],
            recommended_courses: vec![LinkableItem {
                title: "Strategy 101".to_string(),
                url: String::new(),
            }],
            target_companies: vec![LinkableItem {
                title: "Acme".to_string(),
                url: "https://acme.example".to_string(),
            }],
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
    fn test_blocks_come_in_fixed_order() {
        let blocks = plan_blocks(&sample_plan());
        assert_eq!(blocks.len(), 4 + PLAN_WEEKS);
        assert_eq!(blocks[0].kind, BlockKind::Skills);
        assert_eq!(blocks[1].kind, BlockKind::Resources);
        assert_eq!(blocks[2].kind, BlockKind::ThoughtLeaders);
        assert_eq!(blocks[3].kind, BlockKind::TargetCompanies);
        for (i, block) in blocks[4..].iter().enumerate() {
            assert_eq!(block.kind, BlockKind::Week(i as u8 + 1));
        }
    }

    #[test]
    fn test_resources_render_fallback_links() {
        let blocks = plan_blocks(&sample_plan());
        let resources = &blocks[1];
        assert!(resources
            .lines
            .iter()
            .any(|line| line.contains("google.com/search?q=Strategy%20101")));
    }

    #[test]
    fn test_week_block_carries_goals_and_actions() {
        let blocks = plan_blocks(&sample_plan());
        let week_one = &blocks[4];
        assert_eq!(week_one.heading, "Week 1: Theme 1");
        assert!(week_one.lines.contains(&"Key Goals:".to_string()));
        assert!(week_one.lines.contains(&"- Goal 1".to_string()));
        assert!(week_one.lines.contains(&"Action Items:".to_string()));
        assert!(week_one.lines.contains(&"- Action 1".to_string()));
    }

    #[test]
    fn test_block_height_grows_with_content() {
        let mut plan = sample_plan();
        let short = skills_block(&plan);
        plan.skills_to_develop
            .extend((0..20).map(|i| format!("Skill {i}")));
        let tall = skills_block(&plan);
        assert!(tall.height_mm() > short.height_mm());
        assert!(short.height_mm() > 0.0);
    }
}
