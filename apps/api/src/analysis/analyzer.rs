//! Analyzer: orchestrates one resume + cover letter analysis.
//!
//! Flow: validate → resume prompt → complete → extract → parse →
//!       cover letter prompt → complete → extract → parse.
//!
//! Everything up to and including JSON parsing is fail-fast: the first failure
//! discards both records. Scoring happens afterwards and never fails.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::analysis::prompts::{build_cover_letter_prompt, build_resume_prompt};
use crate::llm_client::extract::{extract_json_block, ExtractionError};
use crate::llm_client::{CompletionClient, CompletionError, MODEL};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Please fill in all fields (missing: {})", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
}

impl From<CompletionError> for AnalysisError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Authentication(msg) => AnalysisError::Authentication(msg),
            CompletionError::Network(msg) => AnalysisError::Network(msg),
            CompletionError::Service { status, message } => {
                AnalysisError::Service { status, message }
            }
        }
    }
}

/// The four form fields. All required, none may be empty.
/// Absent and `null` fields deserialize as empty so `validate` reports them.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub credential: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub resume_text: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cover_letter_text: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub job_description_text: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("credential", &"<redacted>")
            .field("resume_text_len", &self.resume_text.len())
            .field("cover_letter_text_len", &self.cover_letter_text.len())
            .field("job_description_text_len", &self.job_description_text.len())
            .finish()
    }
}

impl AnalysisRequest {
    /// Rejects the request if any field is empty. Whitespace counts as content.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let missing: Vec<&'static str> = [
            ("credential", &self.credential),
            ("resume_text", &self.resume_text),
            ("cover_letter_text", &self.cover_letter_text),
            ("job_description_text", &self.job_description_text),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::Validation(missing))
        }
    }
}

/// The two parsed model records, unscored.
#[derive(Debug, Clone)]
pub struct RawAnalysis {
    pub resume: Value,
    pub cover_letter: Value,
}

/// Wire shape of the raw analysis: on failure the resume side carries
/// `{"error": ...}` and the cover letter side is an empty object.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisPair {
    pub resume_analysis: Value,
    pub cover_analysis: Value,
}

impl From<Result<RawAnalysis, AnalysisError>> for AnalysisPair {
    fn from(result: Result<RawAnalysis, AnalysisError>) -> Self {
        match result {
            Ok(raw) => AnalysisPair {
                resume_analysis: raw.resume,
                cover_analysis: raw.cover_letter,
            },
            Err(e) => AnalysisPair {
                resume_analysis: json!({ "error": e.to_string() }),
                cover_analysis: json!({}),
            },
        }
    }
}

/// Runs the full analysis. Validation happens before any completion call.
pub async fn analyze(
    client: &dyn CompletionClient,
    request: &AnalysisRequest,
) -> Result<RawAnalysis, AnalysisError> {
    request.validate()?;

    let result = run_completions(client, request).await;
    if let Err(e) = &result {
        error!("Analysis failed: {e}");
    }
    result
}

async fn run_completions(
    client: &dyn CompletionClient,
    request: &AnalysisRequest,
) -> Result<RawAnalysis, AnalysisError> {
    info!("Sending resume prompt to {MODEL}...");
    let prompt = build_resume_prompt(&request.resume_text, &request.job_description_text);
    let raw = client.complete(&request.credential, &prompt).await?;
    debug!("Raw resume response:\n{raw}");
    let resume = parse_completion(&raw)?;

    info!("Sending cover letter prompt to {MODEL}...");
    let prompt =
        build_cover_letter_prompt(&request.cover_letter_text, &request.job_description_text);
    let raw = client.complete(&request.credential, &prompt).await?;
    debug!("Raw cover letter response:\n{raw}");
    let cover_letter = parse_completion(&raw)?;

    Ok(RawAnalysis {
        resume,
        cover_letter,
    })
}

fn parse_completion(raw: &str) -> Result<Value, AnalysisError> {
    let block = extract_json_block(raw)?;
    Ok(serde_json::from_str(block)?)
}
