// Wire-level prompt constants. Domain prompt templates (portrait and plan
// variants) live in generation::prompts.

/// Classification prompt, sent alongside the uploaded photo. The answer is
/// the bare subject string and nothing else.
pub const CLASSIFY_SUBJECT_PROMPT: &str = "Analyze this image. Identify the main subject. \
    If it is a human, return exactly \"Human\". \
    If it is an animal, return the specific species and breed/color if clear \
    (e.g., \"Golden Retriever\", \"Siamese Cat\", \"Hamster\"). \
    Return ONLY the subject string.";
