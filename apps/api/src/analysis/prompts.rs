// All LLM prompt text for the analysis pipeline.
// Reuses the JSON-only fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, JSON_ONLY_STRICT_INSTRUCTION};

/// Resume evaluation instructions. The schema lists the six requirement categories
/// in catalog order; `skills_match` entries must be copied from `all_items_required`.
pub const RESUME_EVALUATION_INSTRUCTIONS: &str = r#"You are a job application evaluator. Compare the RESUME to the JOB DESCRIPTION and return a structured JSON object with the following format:

{
  "all_items_required": {
    "required_experience": [...],
    "education": [...],
    "certifications": [...],
    "hard_skills": [...],
    "soft_skills": [...],
    "culture_keywords": [...]
  },
  "skills_match": {
    "required_experience": [...],
    "education": [...],
    "certifications": [...],
    "hard_skills": [...],
    "soft_skills": [...],
    "culture_keywords": [...]
  }
}

Instructions:
- For `all_items_required`, list each requirement exactly as written in the job description.
- For `skills_match`, include an item only if it appears in the resume, but use the exact text from `all_items_required`. Do not reword or paraphrase.
- This means: if the resume implies or describes the skill, it's a match, but always copy the exact phrase from `all_items_required` into `skills_match`."#;

/// Cover letter rubric: output format, point tiers, and the four-trait checklist per category.
pub const COVER_LETTER_RUBRIC_INSTRUCTIONS: &str = r#"You are a professional hiring evaluator. Analyze the COVER LETTER in the context of the JOB DESCRIPTION and return a JSON rubric with 5 scoring categories. Each category is worth up to 20 points, totaling 100.

Use the defined scoring tiers and checklist items for each category below. Base the score on how many of the listed traits are clearly and effectively demonstrated in the letter. Only assign higher scores when a higher number of traits are present and executed at an exceptional level.

---

### SCORING FORMAT:
Return the result as valid JSON in this format:

{
  "rubric": {
    "hook_strength": { "score": 0-20, "reason": "..." },
    "uniqueness": { "score": 0-20, "reason": "..." },
    "engagement": { "score": 0-20, "reason": "..." },
    "culture_alignment": { "score": 0-20, "reason": "..." },
    "additional_value": { "score": 0-20, "reason": "..." }
  }
}

---

### CATEGORY SCORING SYSTEM:

For each category below:

- **0 points** -> 0-1 traits demonstrated
- **1-5 points** -> 2-3 traits demonstrated
- **5-10 points** -> All traits demonstrated
- **11-15 points** -> All traits demonstrated with polish and strong structure
- **16-20 points** -> All traits demonstrated with excellence and originality: goes beyond expectations or includes a "genius" insight or moment

---

### 1. Hook Strength (Intro Opening)

Checklist:
- Opens with a fresh, original sentence, not a template or generic opening
- Instantly establishes a personal connection to the company's mission, product, or values
- Introduces a narrative thread or insight that carries through the letter
- Feels like the beginning of a compelling story, not just an application

---

### 2. Uniqueness / Personal Brand

Checklist:
- Shares a distinct point of view, personal philosophy, or rare experience
- Clearly articulates why they are uniquely suited to this role, not just qualified
- Tells a short, meaningful story or origin moment that connects to the work
- Voice feels authentic, intentional, and undeniably theirs

---

### 3. Engagement / Writing Quality

Checklist:
- Language is rhythmic, vivid, and precise; avoids corporate jargon or filler
- Every sentence feels intentional, with no wasted words
- Shows emotional intelligence through tone and phrasing
- Maintains strong pacing and energy from beginning to end

---

### 4. Culture Alignment

Checklist:
- References the company's actual values, tone, or brand language
- Mirrors the company's communication style and language choices
- Connects their own work habits, motivations, or mindset to the company's environment
- Shows insight into the company's mission, tone, or way of working beyond surface-level language

---

### 5. Additional Value or Strengths

Checklist:
- Mentions rare or bonus skills, experiences, or results
- Frames value-adds in a way that solves real problems or enhances the team
- Offers insight or perspective that expands the role or vision
- Shows they're thinking beyond the job description, like a partner or builder

---"#;

/// Builds the resume-vs-job prompt. Inputs are interpolated once and never re-expanded.
pub fn build_resume_prompt(resume: &str, job_description: &str) -> String {
    format!(
        "\n{instructions}\n\n{json_only}\n\nRESUME:\n{resume}\n\nJOB DESCRIPTION:\n{job_description}\n",
        instructions = RESUME_EVALUATION_INSTRUCTIONS,
        json_only = JSON_ONLY_INSTRUCTION,
    )
}

/// Builds the cover-letter rubric prompt.
pub fn build_cover_letter_prompt(cover_letter: &str, job_description: &str) -> String {
    format!(
        "\n{instructions}\n\n{json_only}\n\nCOVER LETTER:\n{cover_letter}\n\nJOB DESCRIPTION:\n{job_description}\n",
        instructions = COVER_LETTER_RUBRIC_INSTRUCTIONS,
        json_only = JSON_ONLY_STRICT_INSTRUCTION,
    )
}
