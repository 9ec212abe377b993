//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyzer::{analyze, AnalysisPair, AnalysisRequest};
use crate::analysis::report::{build_report, AnalysisReport};
use crate::errors::AppError;
use crate::llm_client::MODEL;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub model: &'static str,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

/// POST /api/v1/analyze
///
/// Runs both completion calls and returns scores, tables, chart series and suggestions.
/// Any failure up to JSON parsing replaces the whole result with a single error.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;
    let analysis_id = Uuid::new_v4();
    info!("Analysis {analysis_id} started");

    let raw = analyze(state.completion.as_ref(), &request).await?;
    let report = build_report(&raw.resume, &raw.cover_letter);

    info!(
        "Analysis {analysis_id} done: resume={}/100, cover_letter={}/100",
        report.resume.overall_score, report.cover_letter.overall_score
    );

    Ok(Json(AnalyzeResponse {
        analysis_id,
        analyzed_at: Utc::now(),
        model: MODEL,
        report,
    }))
}

/// POST /api/v1/analyze/raw
///
/// Returns the two parsed records unscored. Empty, `null` or non-string fields are still rejected with 400;
/// later failures come back as `{"resume_analysis": {"error": ...}, "cover_analysis": {}}`.
pub async fn handle_analyze_raw(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisPair>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let result = analyze(state.completion.as_ref(), &request).await;
    Ok(Json(AnalysisPair::from(result)))
}
