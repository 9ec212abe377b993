//! Score aggregation over the two JSON records returned by the model.
//!
//! Scoring never fails. Any structural problem in the model output (a missing
//! section, a non-array category, a non-numeric rubric score) degrades to a zero
//! score instead of aborting the analysis, which has already been parsed successfully.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::analysis::categories::{title_case, RequirementCategory};

pub const REQUIRED_KEY: &str = "all_items_required";
pub const MATCHED_KEY: &str = "skills_match";
pub const RUBRIC_KEY: &str = "rubric";

/// Coverage of one requirement category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Raw key, so categories outside the catalog still show up.
    pub category: String,
    pub label: String,
    pub required: usize,
    pub matched: usize,
    /// 0 – 100, two decimal places
    pub score: f64,
    /// Required items absent from the match list, in catalog order.
    pub missing: Vec<String>,
}

/// Distinct required items (first occurrence order) and the subset the model matched.
#[derive(Debug, Default)]
struct CategorySets<'a> {
    required: Vec<&'a str>,
    matched: Vec<&'a str>,
}

impl CategorySets<'_> {
    fn percentage(&self) -> f64 {
        coverage_percentage(self.matched.len(), self.required.len())
    }

    fn missing(&self) -> Vec<String> {
        self.required
            .iter()
            .filter(|item| !self.matched.contains(*item))
            .map(|item| item.to_string())
            .collect()
    }
}

/// matched / required × 100, or 0 when nothing is required.
pub fn coverage_percentage(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    matched as f64 / required as f64 * 100.0
}

/// Two decimal places, halves to even: 3.125 → 3.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Overall resume match: mean coverage over categories that list at least one
/// requirement. Categories without requirements are left out, not counted as 0.
pub fn score_resume(resume: &Value) -> f64 {
    let Some((required, matched)) = resume_sections(resume) else {
        return 0.0;
    };

    let sets: Option<Vec<CategorySets>> = RequirementCategory::ALL
        .into_iter()
        .map(|category| category_sets(required, Some(matched), category.key()))
        .collect();

    let Some(sets) = sets else {
        return 0.0;
    };

    let counted: Vec<f64> = sets
        .iter()
        .filter(|s| !s.required.is_empty())
        .map(CategorySets::percentage)
        .collect();

    if counted.is_empty() {
        return 0.0;
    }
    round2(counted.iter().sum::<f64>() / counted.len() as f64)
}

/// Overall cover letter score: the sum of every rubric entry's score.
pub fn score_cover_letter(cover_letter: &Value) -> f64 {
    cover_letter
        .get(RUBRIC_KEY)
        .and_then(Value::as_object)
        .and_then(|rubric| {
            rubric
                .values()
                .map(|entry| entry.get("score").and_then(Value::as_f64))
                .sum::<Option<f64>>()
        })
        .unwrap_or(0.0)
}

/// Per-category rows for the categories the model listed: catalog categories in
/// catalog order, then any extra keys in the order the model returned them.
///
/// An absent `skills_match` section counts as "nothing matched". Any other
/// structural problem yields an empty breakdown.
pub fn resume_breakdown(resume: &Value) -> Vec<CategoryBreakdown> {
    let Some(required) = resume.get(REQUIRED_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };
    let matched = match resume.get(MATCHED_KEY) {
        None => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => return Vec::new(),
    };

    let known = RequirementCategory::ALL
        .into_iter()
        .map(|category| -> &str { category.key() })
        .filter(|key| required.contains_key(*key));
    let unknown = required
        .keys()
        .map(String::as_str)
        .filter(|key| RequirementCategory::from_key(key).is_none());

    known
        .chain(unknown)
        .map(|key| {
            category_sets(required, matched, key).map(|sets| CategoryBreakdown {
                category: key.to_string(),
                label: RequirementCategory::from_key(key)
                    .map(RequirementCategory::label)
                    .unwrap_or_else(|| title_case(key)),
                required: sets.required.len(),
                matched: sets.matched.len(),
                score: round2(sets.percentage()),
                missing: sets.missing(),
            })
        })
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

fn resume_sections(resume: &Value) -> Option<(&Map<String, Value>, &Map<String, Value>)> {
    let required = resume.get(REQUIRED_KEY)?.as_object()?;
    let matched = resume.get(MATCHED_KEY)?.as_object()?;
    Some((required, matched))
}

/// `None` when either side of the category is present but not an array of strings.
fn category_sets<'a>(
    required: &'a Map<String, Value>,
    matched: Option<&'a Map<String, Value>>,
    key: &str,
) -> Option<CategorySets<'a>> {
    let required_items = string_list(required.get(key))?;
    let matched_items: HashSet<&str> = match matched {
        Some(map) => string_list(map.get(key))?.into_iter().collect(),
        None => HashSet::new(),
    };

    let mut seen = HashSet::new();
    let required: Vec<&str> = required_items
        .into_iter()
        .filter(|item| seen.insert(*item))
        .collect();
    let matched = required
        .iter()
        .copied()
        .filter(|item| matched_items.contains(item))
        .collect();

    Some(CategorySets { required, matched })
}

/// Absent → empty list; an array of strings → its items; anything else → `None`.
fn string_list(value: Option<&Value>) -> Option<Vec<&str>> {
    match value {
        None => Some(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(Value::as_str).collect(),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rubric(scores: &[u64]) -> Value {
        let keys = [
            "hook_strength",
            "uniqueness",
            "engagement",
            "culture_alignment",
            "additional_value",
        ];
        let mut map = Map::new();
        for (key, score) in keys.iter().zip(scores) {
            map.insert(key.to_string(), json!({"score": score, "reason": "ok"}));
        }
        json!({ "rubric": map })
    }

    #[test]
    fn test_empty_categories_are_excluded_from_mean() {
        let data = json!({
            "all_items_required": {"hard_skills": ["A", "B"], "education": []},
            "skills_match": {"hard_skills": ["A"]}
        });
        assert_eq!(score_resume(&data), 50.0);
    }

    #[test]
    fn test_mean_over_counted_categories() {
        let data = json!({
            "all_items_required": {
                "hard_skills": ["Rust", "SQL"],
                "soft_skills": ["Mentoring", "Communication", "Ownership"],
                "education": ["BSc Computer Science"]
            },
            "skills_match": {
                "hard_skills": ["Rust", "SQL"],
                "soft_skills": ["Mentoring"],
                "education": []
            }
        });
        // (100 + 33.333 + 0) / 3 = 44.44
        assert_eq!(score_resume(&data), 44.44);
    }

    #[test]
    fn test_no_requirements_scores_zero() {
        let data = json!({"all_items_required": {}, "skills_match": {}});
        assert_eq!(score_resume(&data), 0.0);
    }

    #[test]
    fn test_missing_required_section_scores_zero() {
        let data = json!({"skills_match": {"hard_skills": ["A"]}});
        assert_eq!(score_resume(&data), 0.0);
    }

    #[test]
    fn test_missing_match_section_scores_zero() {
        let data = json!({"all_items_required": {"hard_skills": ["A"]}});
        assert_eq!(score_resume(&data), 0.0);
    }

    #[test]
    fn test_non_array_category_scores_zero() {
        let data = json!({
            "all_items_required": {"hard_skills": "Rust, SQL"},
            "skills_match": {}
        });
        assert_eq!(score_resume(&data), 0.0);
    }

    #[test]
    fn test_non_object_input_scores_zero() {
        assert_eq!(score_resume(&json!([1, 2, 3])), 0.0);
        assert_eq!(score_resume(&Value::Null), 0.0);
    }

    #[test]
    fn test_duplicates_and_unlisted_matches_do_not_exceed_100() {
        let data = json!({
            "all_items_required": {"hard_skills": ["Rust", "Rust"]},
            "skills_match": {"hard_skills": ["Rust", "Go", "Python"]}
        });
        assert_eq!(score_resume(&data), 100.0);
    }

    #[test]
    fn test_unknown_categories_do_not_affect_score() {
        let data = json!({
            "all_items_required": {"hard_skills": ["A"], "languages": ["French"]},
            "skills_match": {"hard_skills": ["A"], "languages": []}
        });
        assert_eq!(score_resume(&data), 100.0);
    }

    #[test]
    fn test_cover_letter_perfect_rubric_is_100() {
        assert_eq!(score_cover_letter(&rubric(&[20, 20, 20, 20, 20])), 100.0);
    }

    #[test]
    fn test_cover_letter_sums_scores() {
        assert_eq!(score_cover_letter(&rubric(&[12, 8, 15, 4, 0])), 39.0);
    }

    #[test]
    fn test_cover_letter_missing_or_empty_rubric_is_zero() {
        assert_eq!(score_cover_letter(&json!({})), 0.0);
        assert_eq!(score_cover_letter(&json!({"rubric": {}})), 0.0);
        assert_eq!(score_cover_letter(&json!({"rubric": "n/a"})), 0.0);
    }

    #[test]
    fn test_cover_letter_entry_without_score_is_zero() {
        let data = json!({"rubric": {
            "hook_strength": {"score": 10, "reason": "x"},
            "uniqueness": {"reason": "no score given"}
        }});
        assert_eq!(score_cover_letter(&data), 0.0);
    }

    #[test]
    fn test_cover_letter_counts_unknown_entries() {
        let data = json!({"rubric": {
            "hook_strength": {"score": 10, "reason": "x"},
            "tone": {"score": 5, "reason": "y"}
        }});
        assert_eq!(score_cover_letter(&data), 15.0);
    }

    #[test]
    fn test_breakdown_follows_catalog_order_and_lists_missing() {
        let data = json!({
            "all_items_required": {
                "soft_skills": ["Mentoring", "Empathy"],
                "required_experience": ["5+ years backend", "On-call experience"]
            },
            "skills_match": {
                "soft_skills": ["Empathy"],
                "required_experience": ["5+ years backend"]
            }
        });
        let rows = resume_breakdown(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "required_experience");
        assert_eq!(rows[0].label, "Required Experience");
        assert_eq!(rows[0].missing, vec!["On-call experience".to_string()]);
        assert_eq!(rows[1].category, "soft_skills");
        assert_eq!(rows[1].required, 2);
        assert_eq!(rows[1].matched, 1);
        assert_eq!(rows[1].score, 50.0);
        assert_eq!(rows[1].missing, vec!["Mentoring".to_string()]);
    }

    #[test]
    fn test_breakdown_rounds_to_two_places() {
        let data = json!({
            "all_items_required": {"hard_skills": ["A", "B", "C"]},
            "skills_match": {"hard_skills": ["A"]}
        });
        assert_eq!(resume_breakdown(&data)[0].score, 33.33);
    }

    #[test]
    fn test_breakdown_keeps_empty_category_at_zero() {
        let data = json!({
            "all_items_required": {"certifications": []},
            "skills_match": {}
        });
        let rows = resume_breakdown(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, 0.0);
        assert!(rows[0].missing.is_empty());
    }

    #[test]
    fn test_breakdown_without_match_section_reports_everything_missing() {
        let data = json!({"all_items_required": {"education": ["MSc"]}});
        let rows = resume_breakdown(&data);
        assert_eq!(rows[0].matched, 0);
        assert_eq!(rows[0].missing, vec!["MSc".to_string()]);
    }

    #[test]
    fn test_breakdown_malformed_is_empty() {
        let data = json!({"all_items_required": {"education": [1, 2]}, "skills_match": {}});
        assert!(resume_breakdown(&data).is_empty());
        assert!(resume_breakdown(&json!({"all_items_required": []})).is_empty());
    }

    #[test]
    fn test_mean_rounds_half_to_even() {
        // (12.5 + 0 + 0 + 0) / 4 = 3.125
        let data = json!({
            "all_items_required": {
                "hard_skills": ["A", "B", "C", "D", "E", "F", "G", "H"],
                "soft_skills": ["Empathy"],
                "education": ["MSc"],
                "certifications": ["CKA"]
            },
            "skills_match": {"hard_skills": ["A"]}
        });
        assert_eq!(score_resume(&data), 3.12);
        assert_eq!(round2(33.333), 33.33);
    }

    #[test]
    fn test_paraphrased_match_counts_as_missing() {
        let data = json!({
            "all_items_required": {"hard_skills": ["Experience with Kubernetes", "Rust"]},
            "skills_match": {"hard_skills": ["Kubernetes experience", "Rust"]}
        });
        assert_eq!(score_resume(&data), 50.0);
        let rows = resume_breakdown(&data);
        assert_eq!(rows[0].matched, 1);
        assert_eq!(rows[0].missing, vec!["Experience with Kubernetes".to_string()]);
    }

    #[test]
    fn test_breakdown_appends_unknown_categories_in_returned_order() {
        let data = json!({
            "all_items_required": {
                "tools": ["Terraform"],
                "hard_skills": ["Rust"],
                "languages": ["French"]
            },
            "skills_match": {"hard_skills": ["Rust"], "languages": ["French"]}
        });
        let rows = resume_breakdown(&data);
        let keys: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(keys, vec!["hard_skills", "tools", "languages"]);
        assert_eq!(rows[1].label, "Tools");
        assert_eq!(rows[1].missing, vec!["Terraform".to_string()]);
        assert_eq!(rows[2].score, 100.0);
        // the overall score still covers catalog categories only
        assert_eq!(score_resume(&data), 100.0);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(coverage_percentage(0, 0), 0.0);
        assert_eq!(coverage_percentage(0, 4), 0.0);
        assert_eq!(coverage_percentage(4, 4), 100.0);
    }
}
