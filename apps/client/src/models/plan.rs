//! Plan records — the structured-output contract for the plan generator.
//! Field names mirror the wire schema (camelCase) exactly.

use serde::{Deserialize, Serialize};

/// Number of weeks in every transition plan.
pub const PLAN_WEEKS: usize = 8;

/// A titled link. The service is asked for a usable URL but may omit one;
/// `resolved_url` substitutes a deterministic search query at render time, so
/// the stored record keeps whatever the service returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkableItem {
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl LinkableItem {
    /// The URL to render: the stored one, or a search-engine query built from
    /// the title when the service left it empty.
    pub fn resolved_url(&self) -> String {
        if self.url.trim().is_empty() {
            format!("https://www.google.com/search?q={}", url_encode(&self.title))
        } else {
            self.url.clone()
        }
    }
}

/// Percent-encodes a query component (UTF-8 bytes, unreserved set kept).
fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// One week of the roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanWeek {
    pub week_number: u8,
    pub theme: String,
    pub goals: Vec<String>,
    pub action_items: Vec<String>,
}

/// An 8-week transition plan for one career. Immutable once produced; the
/// session caches it under the career name it was requested for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPlan {
    pub career: String,
    pub is_fictional: bool,
    pub intro: String,
    pub skills_to_develop: Vec<String>,
    pub thought_leaders: Vec<LinkableItem>,
    pub recommended_courses: Vec<LinkableItem>,
    pub target_companies: Vec<LinkableItem>,
    pub weeks: Vec<PlanWeek>,
}

impl CareerPlan {
    /// Shape check on top of deserialization: exactly `PLAN_WEEKS` weeks,
    /// numbered 1..=8 in order.
    pub fn validate(&self) -> Result<(), String> {
        if self.weeks.len() != PLAN_WEEKS {
            return Err(format!(
                "expected {PLAN_WEEKS} weeks, got {}",
                self.weeks.len()
            ));
        }
        for (i, week) in self.weeks.iter().enumerate() {
            let expected = (i + 1) as u8;
            if week.week_number != expected {
                return Err(format!(
                    "week at position {} is numbered {}",
                    i + 1,
                    week.week_number
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan(career: &str) -> CareerPlan {
        CareerPlan {
            career: career.to_string(),
            is_fictional: false,
            intro: "A short introduction.".to_string(),
            skills_to_develop: vec!["Leadership".to_string()],
            thought_leaders: vec![LinkableItem {
                title: "Jane Doe".to_string(),
                url: String::new(),
            }],
            recommended_courses: vec![LinkableItem {
                title: "Intro Course".to_string(),
                url: "https://example.com/course".to_string(),
            }],
            target_companies: vec![LinkableItem {
                title: "Acme Corp".to_string(),
                url: String::new(),
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
    fn test_plan_deserializes_from_wire_shape() {
        let json = r#"{
            "career": "CEO",
            "isFictional": false,
            "intro": "Lead from the front.",
            "skillsToDevelop": ["Strategic thinking"],
            "thoughtLeaders": [{"title": "Jane Doe", "url": "https://example.com"}],
            "recommendedCourses": [{"title": "Leadership 101", "url": ""}],
            "targetCompanies": [{"title": "Acme Corp"}],
            "weeks": [
                {"weekNumber": 1, "theme": "Foundations", "goals": ["Read"], "actionItems": ["Draft a plan"]},
                {"weekNumber": 2, "theme": "Momentum", "goals": [], "actionItems": []},
                {"weekNumber": 3, "theme": "T", "goals": [], "actionItems": []},
                {"weekNumber": 4, "theme": "T", "goals": [], "actionItems": []},
                {"weekNumber": 5, "theme": "T", "goals": [], "actionItems": []},
                {"weekNumber": 6, "theme": "T", "goals": [], "actionItems": []},
                {"weekNumber": 7, "theme": "T", "goals": [], "actionItems": []},
                {"weekNumber": 8, "theme": "T", "goals": [], "actionItems": []}
            ]
        }"#;
        let plan: CareerPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.career, "CEO");
        assert!(!plan.is_fictional);
        assert_eq!(plan.weeks.len(), PLAN_WEEKS);
        // A missing url defaults to empty rather than failing the decode.
        assert!(plan.target_companies[0].url.is_empty());
        plan.validate().unwrap();
    }

    #[test]
    fn test_resolved_url_prefers_stored_url() {
        let item = LinkableItem {
            title: "Jane Doe".to_string(),
            url: "https://example.com/jane".to_string(),
        };
        assert_eq!(item.resolved_url(), "https://example.com/jane");
    }

    #[test]
    fn test_resolved_url_falls_back_to_search_query() {
        let item = LinkableItem {
            title: "Purr-waterhouseCoopers & Co".to_string(),
            url: "  ".to_string(),
        };
        assert_eq!(
            item.resolved_url(),
            "https://www.google.com/search?q=Purr-waterhouseCoopers%20%26%20Co"
        );
    }

    #[test]
    fn test_validate_rejects_wrong_week_count() {
        let mut plan = sample_plan("CEO");
        plan.weeks.pop();
        let err = plan.validate().unwrap_err();
        assert!(err.contains("expected 8 weeks"));
    }

    #[test]
    fn test_validate_rejects_misnumbered_weeks() {
        let mut plan = sample_plan("CEO");
        plan.weeks[3].week_number = 9;
        let err = plan.validate().unwrap_err();
        assert!(err.contains("position 4"));
    }

    #[test]
    fn test_plan_serde_round_trip() {
        let plan = sample_plan("Astronaut");
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"isFictional\""));
        assert!(json.contains("\"actionItems\""));
        let recovered: CareerPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.career, "Astronaut");
        recovered.validate().unwrap();
    }
}
