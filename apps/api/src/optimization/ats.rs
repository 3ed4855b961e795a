//! ATS keyword tables and the 100-point ATS score.

use std::collections::BTreeMap;

use serde::Serialize;

pub const ACTION_VERBS: &[&str] = &[
    "achieved", "managed", "developed", "implemented", "created", "designed",
    "optimized", "improved", "increased", "reduced", "streamlined", "enhanced",
    "coordinated", "executed", "delivered", "launched", "built", "established",
    "analyzed", "collaborated", "mentored", "trained", "supervised", "directed",
];

pub const TECHNICAL_TERMS: &[&str] = &[
    "programming", "development", "software", "database", "cloud", "security",
    "analytics", "automation", "testing", "deployment", "integration", "architecture",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem-solving", "analytical",
    "strategic", "innovative", "adaptable", "detail-oriented", "results-driven",
];

const INDUSTRY_TERMS: &[(&str, &[&str])] = &[
    ("technology", &["agile", "scrum", "devops", "api", "microservices", "scalability"]),
    ("finance", &["compliance", "risk management", "financial modeling", "portfolio"]),
    ("healthcare", &["patient care", "clinical", "regulatory", "healthcare systems"]),
    (
        "marketing",
        &["brand management", "digital marketing", "seo", "analytics", "campaigns"],
    ),
];

const LISTED_ACTION_VERBS: usize = 20;
/// Only the first verbs of [`ACTION_VERBS`] count toward the score.
const SCORED_ACTION_VERBS: usize = 10;

const KEYWORD_POINTS: f64 = 40.0;
const POINTS_PER_ACTION_VERB: f64 = 3.0;
const MAX_ACTION_VERB_POINTS: f64 = 30.0;
const ACHIEVEMENT_POINTS: f64 = 20.0;
const SUMMARY_POINTS: f64 = 10.0;
const MAX_POINTS: f64 = 100.0;

/// Industry-specific ATS terms; unknown industries have none.
pub fn industry_terms(industry: &str) -> &'static [&'static str] {
    let industry = industry.trim().to_lowercase();
    INDUSTRY_TERMS
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, terms)| *terms)
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct AtsKeywords {
    pub industry: String,
    pub keywords: &'static [&'static str],
    pub action_verbs: &'static [&'static str],
    pub technical_skills: &'static [&'static str],
    pub soft_skills: &'static [&'static str],
}

pub fn ats_keywords(industry: &str) -> AtsKeywords {
    AtsKeywords {
        industry: industry.to_string(),
        keywords: industry_terms(industry),
        action_verbs: &ACTION_VERBS[..LISTED_ACTION_VERBS],
        technical_skills: TECHNICAL_TERMS,
        soft_skills: SOFT_SKILLS,
    }
}

/// The parts of a resume the ATS score looks at.
#[derive(Debug, Default)]
pub struct ScoredResume<'a> {
    pub skills: &'a [String],
    pub bullets: Vec<&'a str>,
    pub has_achievements: bool,
    pub summary: &'a str,
}

/// Points per criterion; they add up to at most 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub keyword_matching: f64,
    pub action_verbs: f64,
    pub quantified_achievements: f64,
    pub structure: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.keyword_matching + self.action_verbs + self.quantified_achievements + self.structure
    }

    /// The total as a share in `[0, 1]`.
    pub fn ats_score(&self) -> f64 {
        self.total().min(MAX_POINTS) / MAX_POINTS
    }
}

/// Scores required-skill coverage of the skills list (40), action verbs in
/// the experience bullets (3 each, up to 30), quantified achievements (20)
/// and a professional summary (10).
pub fn score_breakdown(resume: &ScoredResume<'_>, required_skills: &[String]) -> ScoreBreakdown {
    let skills_text = resume.skills.join(" ").to_lowercase();
    let required: Vec<String> = required_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let keyword_matching = if required.is_empty() {
        0.0
    } else {
        let matched = required.iter().filter(|s| skills_text.contains(s.as_str())).count();
        matched as f64 / required.len() as f64 * KEYWORD_POINTS
    };

    let experience_text = resume.bullets.join(" ").to_lowercase();
    let verbs = ACTION_VERBS[..SCORED_ACTION_VERBS]
        .iter()
        .filter(|verb| experience_text.contains(*verb))
        .count();

    ScoreBreakdown {
        keyword_matching,
        action_verbs: (verbs as f64 * POINTS_PER_ACTION_VERB).min(MAX_ACTION_VERB_POINTS),
        quantified_achievements: if resume.has_achievements { ACHIEVEMENT_POINTS } else { 0.0 },
        structure: if resume.summary.trim().is_empty() { 0.0 } else { SUMMARY_POINTS },
    }
}

/// Occurrences of each required skill in `text`, case-insensitive. Skills
/// that never occur are left out.
pub fn keyword_density(text: &str, required_skills: &[String]) -> BTreeMap<String, usize> {
    let text = text.to_lowercase();
    required_skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .filter_map(|skill| {
            let count = text.matches(skill.trim().to_lowercase().as_str()).count();
            (count > 0).then(|| (skill.clone(), count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_industry_terms_lookup() {
        assert_eq!(industry_terms("Finance")[0], "compliance");
        assert!(industry_terms("aerospace").is_empty());

        let keywords = ats_keywords("technology");
        assert_eq!(keywords.keywords.len(), 6);
        assert_eq!(keywords.action_verbs.len(), 20);
        assert_eq!(keywords.technical_skills.len(), 12);
        assert_eq!(keywords.soft_skills.len(), 10);
    }

    #[test]
    fn test_full_score() {
        let skills = strings(&["Python", "Docker"]);
        let resume = ScoredResume {
            skills: &skills,
            bullets: vec![
                "Achieved 99.9% uptime",
                "Managed a team and developed services",
                "Implemented, created and designed APIs",
                "Optimized, improved, increased and reduced everything",
            ],
            has_achievements: true,
            summary: "Backend engineer",
        };

        let breakdown = score_breakdown(&resume, &strings(&["python", "docker"]));
        assert_eq!(breakdown.keyword_matching, 40.0);
        assert_eq!(breakdown.action_verbs, 30.0);
        assert_eq!(breakdown.total(), 100.0);
        assert_eq!(breakdown.ats_score(), 1.0);
    }

    #[test]
    fn test_partial_score() {
        let skills = strings(&["Python"]);
        let resume = ScoredResume {
            skills: &skills,
            bullets: vec!["Developed a billing service"],
            ..Default::default()
        };

        let breakdown = score_breakdown(&resume, &strings(&["Python", "Go", " "]));
        assert_eq!(breakdown.keyword_matching, 20.0);
        assert_eq!(breakdown.action_verbs, 3.0);
        assert_eq!(breakdown.quantified_achievements, 0.0);
        assert_eq!(breakdown.structure, 0.0);
        assert!((breakdown.ats_score() - 0.23).abs() < 1e-9);
    }

    #[test]
    fn test_no_required_skills_scores_no_keyword_points() {
        let breakdown = score_breakdown(&ScoredResume::default(), &[]);
        assert_eq!(breakdown.total(), 0.0);
    }

    #[test]
    fn test_keyword_density_counts_case_insensitively() {
        let density = keyword_density(
            "Python services. More PYTHON. Some SQL.",
            &strings(&["Python", "SQL", "Rust", ""]),
        );
        assert_eq!(density.get("Python"), Some(&2));
        assert_eq!(density.get("SQL"), Some(&1));
        assert!(!density.contains_key("Rust"));
    }
}
