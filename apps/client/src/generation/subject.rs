//! Subject policy — the human/animal discriminator that drives every prompt.
//!
//! The satirical treatment of non-human subjects is a product requirement,
//! not a styling detail. Both the portrait and the plan prompts branch here
//! and nowhere else, so the variant selection is testable without a network.

use crate::generation::prompts::{
    ANIMAL_PLAN_INSTRUCTIONS_TEMPLATE, ANIMAL_PORTRAIT_PROMPT_TEMPLATE, HUMAN_PLAN_INSTRUCTIONS,
    HUMAN_PORTRAIT_PROMPT_TEMPLATE, PLAN_PROMPT_FOOTER, PLAN_PROMPT_HEADER_TEMPLATE,
};

/// Literal descriptor the classifier returns for people, and the default
/// when classification fails.
pub const HUMAN_DESCRIPTOR: &str = "Human";

/// The photo subject, as detected by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubjectKind {
    #[default]
    Human,
    /// Species/breed description, e.g. "Golden Retriever".
    Animal(String),
}

impl SubjectKind {
    /// Maps a classifier descriptor onto the policy discriminator. Only the
    /// exact literal "Human" (after trimming) selects the realistic variant;
    /// an empty descriptor also defaults to human.
    pub fn from_descriptor(descriptor: &str) -> Self {
        let trimmed = descriptor.trim();
        if trimmed == HUMAN_DESCRIPTOR || trimmed.is_empty() {
            SubjectKind::Human
        } else {
            SubjectKind::Animal(trimmed.to_string())
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, SubjectKind::Human)
    }

    /// The descriptor string shown in status messages and filled into
    /// prompts.
    pub fn descriptor(&self) -> &str {
        match self {
            SubjectKind::Human => HUMAN_DESCRIPTOR,
            SubjectKind::Animal(species) => species,
        }
    }

    /// Portrait prompt for one career: professional realism for people,
    /// anthropomorphic satire with preserved coloring for animals.
    pub fn portrait_prompt(&self, career: &str) -> String {
        match self {
            SubjectKind::Human => HUMAN_PORTRAIT_PROMPT_TEMPLATE.replace("{career}", career),
            SubjectKind::Animal(species) => ANIMAL_PORTRAIT_PROMPT_TEMPLATE
                .replace("{subject}", species)
                .replace("{career}", career),
        }
    }

    /// Plan prompt for one career. Animal subjects force full-satire,
    /// species-specific content; human subjects let the service decide
    /// realism per career and set `isFictional` itself.
    pub fn plan_prompt(&self, career: &str) -> String {
        let header = PLAN_PROMPT_HEADER_TEMPLATE
            .replace("{subject}", self.descriptor())
            .replace("{career}", career);
        let instructions = match self {
            SubjectKind::Human => HUMAN_PLAN_INSTRUCTIONS.to_string(),
            SubjectKind::Animal(species) => {
                ANIMAL_PLAN_INSTRUCTIONS_TEMPLATE.replace("{subject}", species)
            }
        };
        format!("{header}\n{instructions}\n\n{PLAN_PROMPT_FOOTER}")
    }
}
