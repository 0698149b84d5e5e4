//! Plan generation — schema-constrained structured output, parsed into a
//! `CareerPlan`. The session checks its cache before calling here; any
//! failure propagates and nothing is cached.

use serde_json::{json, Value};

use crate::ai_client::{strip_json_fences, GenerativeService};
use crate::errors::AppError;
use crate::generation::subject::SubjectKind;
use crate::models::plan::CareerPlan;

/// JSON schema the structured output must conform to (the CareerPlan shape).
pub fn plan_schema() -> Value {
    let linkable_item = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "url": { "type": "STRING", "description": "A valid URL or search URL." }
        },
        "required": ["title", "url"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "career": { "type": "STRING" },
            "isFictional": { "type": "BOOLEAN" },
            "intro": { "type": "STRING" },
            "skillsToDevelop": { "type": "ARRAY", "items": { "type": "STRING" } },
            "thoughtLeaders": { "type": "ARRAY", "items": linkable_item.clone() },
            "recommendedCourses": { "type": "ARRAY", "items": linkable_item.clone() },
            "targetCompanies": { "type": "ARRAY", "items": linkable_item },
            "weeks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "weekNumber": { "type": "INTEGER" },
                        "theme": { "type": "STRING" },
                        "goals": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "actionItems": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["weekNumber", "theme", "goals", "actionItems"]
                }
            }
        },
        "required": ["career", "isFictional", "intro", "weeks", "skillsToDevelop",
                     "thoughtLeaders", "recommendedCourses", "targetCompanies"]
    })
}

/// Generates the 8-week plan for one career under the subject's tone policy.
pub async fn generate_plan(
    service: &dyn GenerativeService,
    subject: &SubjectKind,
    career: &str,
) -> Result<CareerPlan, AppError> {
    let prompt = subject.plan_prompt(career);
    let text = service.generate_plan(&prompt, plan_schema()).await?;
    parse_plan(&text)
}

/// Parses and shape-checks the structured output.
pub fn parse_plan(text: &str) -> Result<CareerPlan, AppError> {
    let text = strip_json_fences(text);
    if text.trim().is_empty() {
        return Err(AppError::PlanFormat("empty response".to_string()));
    }
    let plan: CareerPlan = serde_json::from_str(text)
        .map_err(|e| AppError::PlanFormat(format!("invalid plan payload: {e}")))?;
    plan.validate().map_err(AppError::PlanFormat)?;
    Ok(plan)
}
