//! Industry detection and static industry profiles.

use std::collections::BTreeMap;

use serde::Serialize;

/// Detection confidence below which a job is treated as [`IndustryType::General`].
const MIN_DETECTION_CONFIDENCE: f64 = 0.1;
/// Confidence reported when detection falls back to the general profile.
const GENERAL_CONFIDENCE: f64 = 0.5;
/// Alignment of any resume with the general profile.
pub const NEUTRAL_INDUSTRY_ALIGNMENT: f64 = 0.7;

const KEY_SKILL_WEIGHT: f64 = 0.9;
const TECHNICAL_SKILL_WEIGHT: f64 = 0.8;
const SOFT_SKILL_WEIGHT: f64 = 0.6;
pub const DEFAULT_SKILL_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndustryType {
    Technology,
    Finance,
    Healthcare,
    Consulting,
    Marketing,
    General,
}

impl IndustryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Finance => "finance",
            Self::Healthcare => "healthcare",
            Self::Consulting => "consulting",
            Self::Marketing => "marketing",
            Self::General => "general",
        }
    }
}

#[derive(Debug)]
pub struct IndustryProfile {
    pub industry: IndustryType,
    pub key_skills: &'static [&'static str],
    pub technical_skills: &'static [&'static str],
    pub soft_skills: &'static [&'static str],
    pub preferred_action_verbs: &'static [&'static str],
    pub metric_types: &'static [&'static str],
    pub content_style: &'static str,
    /// Resume sections in the order this industry reads them.
    pub section_priorities: &'static [&'static str],
    pub achievement_focus: &'static [&'static str],
}

/// Keywords whose presence in a job text votes for an industry. The share of
/// an industry's keywords found is its score.
const DETECTION_KEYWORDS: &[(IndustryType, &[&str])] = &[
    (
        IndustryType::Technology,
        &[
            "software", "programming", "developer", "engineer", "tech", "startup", "cloud",
            "api", "database", "devops", "agile", "scrum",
        ],
    ),
    (
        IndustryType::Finance,
        &[
            "finance", "financial", "banking", "investment", "trading", "risk", "compliance",
            "audit", "portfolio", "capital", "regulatory",
        ],
    ),
    (
        IndustryType::Healthcare,
        &[
            "healthcare", "medical", "hospital", "clinical", "patient", "nurse", "doctor",
            "physician", "health", "pharmaceutical", "biotech",
        ],
    ),
    (
        IndustryType::Consulting,
        &[
            "consulting", "consultant", "advisory", "strategy", "transformation",
            "implementation", "client", "stakeholder", "analysis",
        ],
    ),
    (
        IndustryType::Marketing,
        &[
            "marketing", "advertising", "brand", "campaign", "digital", "social media",
            "content", "seo", "ppc", "analytics", "creative",
        ],
    ),
];

static TECHNOLOGY: IndustryProfile = IndustryProfile {
    industry: IndustryType::Technology,
    key_skills: &[
        "software development", "programming", "system design", "cloud computing", "devops",
        "agile", "api development", "database management", "machine learning",
        "artificial intelligence", "cybersecurity",
    ],
    technical_skills: &[
        "python", "javascript", "react", "node.js", "aws", "kubernetes", "docker",
        "postgresql", "mongodb", "redis", "elasticsearch", "terraform", "jenkins", "git",
        "linux", "microservices",
    ],
    soft_skills: &[
        "problem solving", "analytical thinking", "collaboration", "continuous learning",
        "innovation", "technical communication",
    ],
    preferred_action_verbs: &[
        "developed", "architected", "implemented", "optimized", "automated", "deployed",
        "engineered", "built", "designed", "scaled", "integrated", "migrated", "modernized",
        "refactored",
    ],
    metric_types: &[
        "performance improvement", "system uptime", "user growth", "code coverage",
        "deployment frequency", "bug reduction", "response time", "scalability", "cost savings",
    ],
    content_style: "technical_detailed",
    section_priorities: &["technical_skills", "experience", "projects", "certifications", "education"],
    achievement_focus: &[
        "system performance", "scalability", "automation", "innovation",
        "technical leadership", "code quality",
    ],
};

static FINANCE: IndustryProfile = IndustryProfile {
    industry: IndustryType::Finance,
    key_skills: &[
        "financial analysis", "risk management", "compliance", "auditing", "financial modeling",
        "investment analysis", "portfolio management", "regulatory knowledge",
        "quantitative analysis",
    ],
    technical_skills: &[
        "excel", "python", "r", "sql", "tableau", "power bi", "bloomberg terminal", "matlab",
        "sas", "risk systems", "trading platforms", "financial databases",
    ],
    soft_skills: &[
        "attention to detail", "analytical thinking", "regulatory compliance",
        "client relationship management", "ethical standards", "decision making",
    ],
    preferred_action_verbs: &[
        "analyzed", "evaluated", "assessed", "managed", "optimized", "monitored", "forecasted",
        "calculated", "validated", "audited", "recommended", "structured", "quantified",
        "modeled",
    ],
    metric_types: &[
        "revenue growth", "cost reduction", "roi", "risk mitigation", "compliance rate",
        "portfolio performance", "accuracy rate", "process efficiency", "client satisfaction",
    ],
    content_style: "conservative_professional",
    section_priorities: &["experience", "education", "certifications", "skills", "projects"],
    achievement_focus: &[
        "financial performance", "risk reduction", "compliance", "process improvement",
        "client results", "accuracy",
    ],
};

static HEALTHCARE: IndustryProfile = IndustryProfile {
    industry: IndustryType::Healthcare,
    key_skills: &[
        "patient care", "clinical expertise", "medical knowledge", "healthcare regulations",
        "quality assurance", "safety protocols", "electronic health records",
        "medical documentation",
    ],
    technical_skills: &[
        "ehr systems", "medical devices", "healthcare software", "clinical databases",
        "telemedicine", "medical imaging", "laboratory systems", "healthcare analytics",
    ],
    soft_skills: &[
        "empathy", "communication", "teamwork", "attention to detail", "critical thinking",
        "stress management", "cultural sensitivity",
    ],
    preferred_action_verbs: &[
        "treated", "diagnosed", "administered", "monitored", "assessed", "coordinated",
        "educated", "implemented", "improved", "maintained", "documented", "collaborated",
        "supervised", "trained",
    ],
    metric_types: &[
        "patient outcomes", "safety metrics", "quality scores", "efficiency improvement",
        "patient satisfaction", "compliance rate", "cost reduction", "readmission rates",
    ],
    content_style: "professional_caring",
    section_priorities: &["experience", "education", "certifications", "skills", "achievements"],
    achievement_focus: &[
        "patient outcomes", "quality improvement", "safety", "efficiency",
        "team collaboration", "education",
    ],
};

static GENERAL: IndustryProfile = IndustryProfile {
    industry: IndustryType::General,
    key_skills: &[
        "leadership", "project management", "communication", "problem solving", "teamwork",
        "analytical skills", "customer service", "adaptability",
    ],
    technical_skills: &[
        "microsoft office", "project management tools", "crm systems", "data analysis",
        "presentation software", "collaboration tools",
    ],
    soft_skills: &[
        "communication", "leadership", "teamwork", "adaptability", "problem solving",
        "time management", "critical thinking",
    ],
    preferred_action_verbs: &[
        "managed", "led", "developed", "implemented", "improved", "coordinated", "achieved",
        "delivered", "executed", "optimized",
    ],
    metric_types: &[
        "performance improvement", "cost savings", "efficiency gains", "team productivity",
        "customer satisfaction", "revenue growth",
    ],
    content_style: "professional_balanced",
    section_priorities: &["experience", "skills", "education", "achievements", "projects"],
    achievement_focus: &["results", "leadership", "efficiency", "teamwork", "innovation"],
};

/// Profile for `industry`; industries without a dedicated profile use the general one.
pub fn industry_profile(industry: IndustryType) -> &'static IndustryProfile {
    match industry {
        IndustryType::Technology => &TECHNOLOGY,
        IndustryType::Finance => &FINANCE,
        IndustryType::Healthcare => &HEALTHCARE,
        _ => &GENERAL,
    }
}

/// Scores every industry by the share of its keywords found in the job text
/// and company info. The best score wins; ties go to the earlier industry.
/// Below [`MIN_DETECTION_CONFIDENCE`] the result is `(General, 0.5)`.
pub fn detect_industry(job_text: &str, company_info: &str) -> (IndustryType, f64) {
    let text = format!("{job_text} {company_info}").to_lowercase();

    let mut best = (IndustryType::General, 0.0);
    for (industry, keywords) in DETECTION_KEYWORDS {
        let hits = keywords.iter().filter(|kw| text.contains(*kw)).count();
        let score = hits as f64 / keywords.len() as f64;
        if score > best.1 {
            best = (*industry, score);
        }
    }

    if best.1 < MIN_DETECTION_CONFIDENCE {
        return (IndustryType::General, GENERAL_CONFIDENCE);
    }
    best
}

/// Importance of each skill for `industry`: key skills 0.9, technical 0.8,
/// soft 0.6, anything else 0.5. Matching is exact and case-insensitive.
pub fn calculate_skill_weights<S: AsRef<str>>(
    skills: &[S],
    industry: IndustryType,
) -> BTreeMap<String, f64> {
    let profile = industry_profile(industry);
    let listed = |list: &[&str], skill: &str| list.iter().any(|s| s.eq_ignore_ascii_case(skill));

    skills
        .iter()
        .map(|skill| {
            let skill = skill.as_ref();
            let weight = if listed(profile.key_skills, skill) {
                KEY_SKILL_WEIGHT
            } else if listed(profile.technical_skills, skill) {
                TECHNICAL_SKILL_WEIGHT
            } else if listed(profile.soft_skills, skill) {
                SOFT_SKILL_WEIGHT
            } else {
                DEFAULT_SKILL_WEIGHT
            };
            (skill.to_string(), weight)
        })
        .collect()
}

/// Share of the industry's key and technical skills mentioned in the
/// lower-cased `resume_text`. The general industry is always neutral.
pub fn industry_alignment(resume_text: &str, industry: IndustryType) -> f64 {
    if industry == IndustryType::General {
        return NEUTRAL_INDUSTRY_ALIGNMENT;
    }

    let profile = industry_profile(industry);
    let keywords: Vec<&str> = profile
        .key_skills
        .iter()
        .chain(profile.technical_skills)
        .copied()
        .collect();

    let matched = keywords.iter().filter(|kw| resume_text.contains(*kw)).count();
    (matched as f64 / keywords.len() as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_technology_posting() {
        let (industry, confidence) = detect_industry(
            "Backend software engineer to build cloud APIs on our database platform. Agile team.",
            "",
        );
        assert_eq!(industry, IndustryType::Technology);
        // software, engineer, cloud, api, database, agile
        assert!((confidence - 6.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_company_info_contributes() {
        let (industry, _) = detect_industry("Analyst role", "Global investment banking and trading");
        assert_eq!(industry, IndustryType::Finance);
    }

    #[test]
    fn test_weak_signal_falls_back_to_general() {
        assert_eq!(detect_industry("Cashier wanted", ""), (IndustryType::General, 0.5));
        assert_eq!(detect_industry("", ""), (IndustryType::General, 0.5));
    }

    #[test]
    fn test_profiles_without_dedicated_entry_use_general() {
        assert_eq!(industry_profile(IndustryType::Consulting).industry, IndustryType::General);
        assert_eq!(industry_profile(IndustryType::Finance).content_style, "conservative_professional");
    }

    #[test]
    fn test_skill_weights_by_profile_list() {
        let weights = calculate_skill_weights(
            &["Machine Learning", "Docker", "Collaboration", "Cooking"],
            IndustryType::Technology,
        );
        assert_eq!(weights["Machine Learning"], 0.9);
        assert_eq!(weights["Docker"], 0.8);
        assert_eq!(weights["Collaboration"], 0.6);
        assert_eq!(weights["Cooking"], DEFAULT_SKILL_WEIGHT);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(industry_alignment("", IndustryType::General), NEUTRAL_INDUSTRY_ALIGNMENT);
        assert_eq!(industry_alignment("", IndustryType::Technology), 0.0);

        // 2 of 27 technology keywords
        let aligned = industry_alignment("python and docker", IndustryType::Technology);
        assert!((aligned - 2.0 / 27.0).abs() < 1e-9);
    }
}
