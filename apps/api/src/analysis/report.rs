//! Report building: everything the presentation layer renders, derived from the
//! two parsed records: score tables, chart series, the missing-item checklist and
//! the top suggestions.
//!
//! Like scoring, report building never fails on malformed model output.

use serde::Serialize;
use serde_json::Value;

use crate::analysis::categories::{title_case, RubricCategory};
use crate::analysis::scoring::{
    resume_breakdown, score_cover_letter, score_resume, CategoryBreakdown, RUBRIC_KEY,
};

/// Suggestions shown to the user, resume item first when one exists.
pub const MAX_SUGGESTIONS: usize = 3;
const RESUME_AXIS_MAX: f64 = 100.0;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One labelled series for a radar or bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub axis_max: f64,
}

/// A category with at least one missing requirement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistGroup {
    pub label: String,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeReport {
    pub overall_score: f64, // 0 – 100
    pub categories: Vec<CategoryBreakdown>,
    pub chart: ChartSeries,
    pub checklist: Vec<ChecklistGroup>,
}

/// One rubric line as returned by the model. `category` keeps the raw key so
/// categories the model invented still show up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubricRow {
    pub category: String,
    pub label: String,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterReport {
    pub overall_score: f64, // 0 – 100
    pub rubric: Vec<RubricRow>,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    AddResumeItem,
    ImproveCoverLetter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub category: String,
    pub label: String,
    /// The missing item, or the rubric reason.
    pub detail: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub resume: ResumeReport,
    pub cover_letter: CoverLetterReport,
    pub suggestions: Vec<Suggestion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

pub fn build_report(resume: &Value, cover_letter: &Value) -> AnalysisReport {
    let categories = resume_breakdown(resume);
    let rubric = rubric_rows(cover_letter);
    let suggestions = build_suggestions(&categories, &rubric);

    let resume_chart = ChartSeries {
        labels: categories.iter().map(|c| c.label.clone()).collect(),
        values: categories.iter().map(|c| c.score).collect(),
        axis_max: RESUME_AXIS_MAX,
    };
    let checklist = categories
        .iter()
        .filter(|c| !c.missing.is_empty())
        .map(|c| ChecklistGroup {
            label: c.label.clone(),
            missing: c.missing.clone(),
        })
        .collect();
    let rubric_chart = ChartSeries {
        labels: rubric.iter().map(|r| r.label.clone()).collect(),
        values: rubric.iter().map(|r| r.score).collect(),
        axis_max: RubricCategory::MAX_SCORE,
    };

    AnalysisReport {
        resume: ResumeReport {
            overall_score: score_resume(resume),
            categories,
            chart: resume_chart,
            checklist,
        },
        cover_letter: CoverLetterReport {
            overall_score: score_cover_letter(cover_letter),
            rubric,
            chart: rubric_chart,
        },
        suggestions,
    }
}

/// Rubric rows in the order the model returned them. Entries without a numeric
/// score show 0.
pub fn rubric_rows(cover_letter: &Value) -> Vec<RubricRow> {
    let Some(rubric) = cover_letter.get(RUBRIC_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };

    rubric
        .iter()
        .map(|(key, entry)| RubricRow {
            category: key.to_string(),
            label: RubricCategory::from_key(key)
                .map(RubricCategory::label)
                .unwrap_or_else(|| title_case(key)),
            score: entry.get("score").and_then(Value::as_f64).unwrap_or(0.0),
            reason: entry
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

/// The first missing resume item (catalog order), then the lowest rubric rows
/// ascending by score, capped at `MAX_SUGGESTIONS`.
pub fn build_suggestions(categories: &[CategoryBreakdown], rubric: &[RubricRow]) -> Vec<Suggestion> {
    let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS + 1);

    let first_missing = categories
        .iter()
        .find_map(|c| c.missing.first().map(|item| (c, item)));
    if let Some((category, item)) = first_missing {
        suggestions.push(Suggestion {
            kind: SuggestionKind::AddResumeItem,
            category: category.category.clone(),
            label: category.label.clone(),
            detail: item.clone(),
            message: format!("Add missing resume item: {item} in {}.", category.label),
        });
    }

    // sort_by is stable: equal scores keep rubric order
    let mut lowest: Vec<&RubricRow> = rubric.iter().collect();
    lowest.sort_by(|a, b| a.score.total_cmp(&b.score));

    suggestions.extend(lowest.into_iter().take(MAX_SUGGESTIONS).map(|row| Suggestion {
        kind: SuggestionKind::ImproveCoverLetter,
        category: row.category.clone(),
        label: row.label.clone(),
        detail: row.reason.clone(),
        message: format!("Improve {} in the cover letter: {}", row.label, row.reason),
    }));

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
