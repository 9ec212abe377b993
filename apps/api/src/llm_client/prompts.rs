// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file only holds the pieces every prompt repeats.

/// Closing instruction for prompts whose answer is parsed as a JSON object.
/// Advisory only: the response extractor still tolerates fences and prose.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Only return valid JSON. Do not include markdown formatting or explanations.";

/// Stricter variant for prompts that themselves contain markdown sections.
pub const JSON_ONLY_STRICT_INSTRUCTION: &str = "Only return valid JSON. \
    Do not include markdown, bullet points, section headers, \
    or any explanation outside the JSON object.";
