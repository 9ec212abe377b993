//! The two closed category sets the prompts ask the model to fill in.

use serde::{Deserialize, Serialize};

/// Resume-vs-job comparison dimensions, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementCategory {
    RequiredExperience,
    Education,
    Certifications,
    HardSkills,
    SoftSkills,
    CultureKeywords,
}

impl RequirementCategory {
    pub const ALL: [RequirementCategory; 6] = [
        RequirementCategory::RequiredExperience,
        RequirementCategory::Education,
        RequirementCategory::Certifications,
        RequirementCategory::HardSkills,
        RequirementCategory::SoftSkills,
        RequirementCategory::CultureKeywords,
    ];

    /// JSON key used by the model.
    pub fn key(self) -> &'static str {
        match self {
            RequirementCategory::RequiredExperience => "required_experience",
            RequirementCategory::Education => "education",
            RequirementCategory::Certifications => "certifications",
            RequirementCategory::HardSkills => "hard_skills",
            RequirementCategory::SoftSkills => "soft_skills",
            RequirementCategory::CultureKeywords => "culture_keywords",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn label(self) -> String {
        title_case(self.key())
    }
}

/// Cover-letter rubric dimensions, each worth up to 20 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricCategory {
    HookStrength,
    Uniqueness,
    Engagement,
    CultureAlignment,
    AdditionalValue,
}

impl RubricCategory {
    pub const ALL: [RubricCategory; 5] = [
        RubricCategory::HookStrength,
        RubricCategory::Uniqueness,
        RubricCategory::Engagement,
        RubricCategory::CultureAlignment,
        RubricCategory::AdditionalValue,
    ];

    pub const MAX_SCORE: f64 = 20.0;

    pub fn key(self) -> &'static str {
        match self {
            RubricCategory::HookStrength => "hook_strength",
            RubricCategory::Uniqueness => "uniqueness",
            RubricCategory::Engagement => "engagement",
            RubricCategory::CultureAlignment => "culture_alignment",
            RubricCategory::AdditionalValue => "additional_value",
        }
    }

    /// Looks up a rubric key returned by the model. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn label(self) -> String {
        title_case(self.key())
    }
}

/// `"hard_skills"` → `"Hard Skills"`. Used for keys the model invents too.
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
