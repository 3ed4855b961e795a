use serde::Serialize;

use crate::gap_analysis::analyzer::GapAnalysisResult;

/// Kind of gap an improvement item closes. Each kind has a fixed score ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GapCategory {
    #[serde(rename = "Required Skill")]
    RequiredSkill,
    #[serde(rename = "Programming Language")]
    ProgrammingLanguage,
    Framework,
    Database,
    #[serde(rename = "Cloud Platform")]
    CloudPlatform,
    #[serde(rename = "Preferred Skill")]
    PreferredSkill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl GapCategory {
    pub fn priority_score(self) -> u32 {
        match self {
            Self::RequiredSkill => 10,
            Self::ProgrammingLanguage => 8,
            Self::Framework => 7,
            Self::Database | Self::CloudPlatform => 6,
            Self::PreferredSkill => 4,
        }
    }

    pub fn urgency(self) -> Urgency {
        match self {
            Self::RequiredSkill => Urgency::Critical,
            Self::ProgrammingLanguage | Self::Framework => Urgency::High,
            Self::Database | Self::CloudPlatform => Urgency::Medium,
            Self::PreferredSkill => Urgency::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityItem {
    pub category: GapCategory,
    pub item: String,
    pub priority_score: u32,
    pub urgency: Urgency,
}

impl PriorityItem {
    fn new(category: GapCategory, item: &str) -> Self {
        Self {
            category,
            item: item.to_string(),
            priority_score: category.priority_score(),
            urgency: category.urgency(),
        }
    }
}

/// One item per missing skill, highest score first.
/// Items with equal scores keep their category order and list order.
pub fn calculate_priority_scores(gap: &GapAnalysisResult) -> Vec<PriorityItem> {
    let groups = [
        (GapCategory::RequiredSkill, &gap.missing_required_skills),
        (GapCategory::ProgrammingLanguage, &gap.missing_languages),
        (GapCategory::Framework, &gap.missing_frameworks),
        (GapCategory::Database, &gap.missing_databases),
        (GapCategory::CloudPlatform, &gap.missing_cloud_platforms),
        (GapCategory::PreferredSkill, &gap.missing_preferred_skills),
    ];

    let mut items: Vec<PriorityItem> = groups
        .into_iter()
        .flat_map(|(category, missing)| missing.iter().map(move |item| PriorityItem::new(category, item)))
        .collect();

    // sort_by is stable
    items.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
    items
}
