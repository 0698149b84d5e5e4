// Prompt templates for portrait and plan generation.
// `{career}` and `{subject}` are filled by `subject::SubjectKind` before
// sending; there is no other substitution.

/// Portrait prompt for human subjects. Asks for resemblance rather than
/// identity to stay clear of strict identity safety filters.
pub const HUMAN_PORTRAIT_PROMPT_TEMPLATE: &str =
    "Generate a photorealistic portrait of a person resembling the subject in the input image, \
     reimagined as a {career}. \
     The person should be wearing professional {career} attire and placed in a relevant environment. \
     High quality, cinematic lighting, 8k resolution.";

/// Portrait prompt for animal subjects: anthropomorphized satire that keeps
/// the original animal's coloring and markings.
pub const ANIMAL_PORTRAIT_PROMPT_TEMPLATE: &str =
    "Create a photorealistic, adorable, and funny portrait of a {subject} dressed as a {career}. \
     The animal should be wearing the professional attire of a {career} (e.g. uniform, suit, gear). \
     Match the fur color and markings of the original animal. \
     The animal should look like they are seriously doing the job. \
     High quality, cinematic lighting.";

/// Shared opening of every plan prompt.
pub const PLAN_PROMPT_HEADER_TEMPLATE: &str =
    "Create an 8-week career transition plan for a {subject} becoming a \"{career}\".\n\n\
     CONTEXT: The subject is a {subject}.\n";

/// Plan instructions when the subject is an animal: everything is satire,
/// tailored to the species.
pub const ANIMAL_PLAN_INSTRUCTIONS_TEMPLATE: &str = r#"IMPORTANT: Since the subject is an animal ({subject}), the entire plan MUST be satirical, funny, and tailored to that animal's behaviors.
- Skills should relate to the animal (e.g., for a Cat CEO: "Knocking mugs off tables with authority").
- "Thought Leaders" should be famous animals or funny animal puns.
- "Target Companies" should be animal-related puns (e.g., "Purr-waterhouseCoopers").
- The tone should be professional yet absurdly specific to the animal species."#;

/// Plan instructions when the subject is human: the service decides realism
/// per career and sets `isFictional` itself.
pub const HUMAN_PLAN_INSTRUCTIONS: &str = r#"If the career is REAL (e.g., Accountant, Chef): Provide actionable advice, real thought leaders, and real companies.
If the career is FICTIONAL (e.g., Wizard): Write in a professional but satirical tone."#;

/// Shared closing of every plan prompt.
pub const PLAN_PROMPT_FOOTER: &str =
    "Return the response in JSON format according to the schema.";
