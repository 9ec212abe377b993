// Resume & cover letter analysis
// Implements: prompt building, the two completion calls, scoring, and the report
// the presentation layer renders. All LLM calls go through llm_client.

pub mod analyzer;
pub mod categories;
pub mod handlers;
pub mod prompts;
pub mod report;
pub mod scoring;
