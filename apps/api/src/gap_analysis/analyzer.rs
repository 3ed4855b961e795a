//! Gap scoring between a parsed resume and a set of job requirements.
//!
//! Everything here is pure: the same resume and requirements always give the
//! same result, and nothing touches the database or the network.

use serde::Serialize;

use crate::gap_analysis::priority::{calculate_priority_scores, PriorityItem};
use crate::gap_analysis::recommendations::generate_recommendations;
use crate::job_analysis::requirements::JobRequirements;
use crate::models::resume::ParsedResume;
use crate::skills::extractor::extract_skills_from_resume;
use crate::skills::find_skill_matches;

/// Years assumed when the resume does not state any.
pub const ASSUMED_RESUME_YEARS: u32 = 2;

/// Level assumed when the resume does not state one.
pub const DEFAULT_RESUME_LEVEL: &str = "mid";

/// Outcome of comparing one resume against one job. Every skill in the
/// matching/missing lists is in normalized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GapAnalysisResult {
    /// Share of required skills, languages and frameworks covered, in `[0, 1]`.
    pub overall_match_score: f64,

    pub matching_skills: Vec<String>,
    pub missing_required_skills: Vec<String>,
    pub missing_preferred_skills: Vec<String>,

    /// Years short of the requirement; `None` when the job states none.
    pub experience_gap: Option<u32>,
    pub experience_level_match: bool,

    pub matching_technologies: Vec<String>,
    pub missing_technologies: Vec<String>,
    pub matching_languages: Vec<String>,
    pub missing_languages: Vec<String>,
    pub matching_frameworks: Vec<String>,
    pub missing_frameworks: Vec<String>,
    pub matching_databases: Vec<String>,
    pub missing_databases: Vec<String>,
    pub matching_cloud_platforms: Vec<String>,
    pub missing_cloud_platforms: Vec<String>,

    pub recommendations: Vec<String>,
    pub improvement_priority: Vec<PriorityItem>,
}

pub fn analyze_gap(resume: &ParsedResume, requirements: &JobRequirements) -> GapAnalysisResult {
    let resume_skills = extract_skills_from_resume(resume);

    let (matching_required, missing_required) =
        find_skill_matches(&resume_skills, &requirements.required_skills);
    let (matching_preferred, missing_preferred) =
        find_skill_matches(&resume_skills, &requirements.preferred_skills);
    let (matching_languages, missing_languages) =
        find_skill_matches(&resume_skills, &requirements.programming_languages);
    let (matching_frameworks, missing_frameworks) =
        find_skill_matches(&resume_skills, &requirements.frameworks);
    let (matching_databases, missing_databases) =
        find_skill_matches(&resume_skills, &requirements.databases);
    let (matching_cloud, missing_cloud) =
        find_skill_matches(&resume_skills, &requirements.cloud_platforms);

    // Blank job skills are dropped by find_skill_matches, so the denominator
    // only counts skills that could have matched.
    let matched = matching_required.len() + matching_languages.len() + matching_frameworks.len();
    let total = matched + missing_required.len() + missing_languages.len() + missing_frameworks.len();
    let overall_match_score = if total == 0 {
        0.0
    } else {
        (matched as f64 / total as f64).min(1.0)
    };

    let experience_gap = calculate_experience_gap(
        resume.years_of_experience,
        requirements.required_experience_years,
    );

    let resume_level = resume
        .experience_level
        .as_deref()
        .filter(|level| !level.trim().is_empty())
        .unwrap_or(DEFAULT_RESUME_LEVEL);
    let experience_level_match =
        check_experience_level_match(resume_level, &requirements.experience_level);

    let mut result = GapAnalysisResult {
        overall_match_score,
        matching_skills: [matching_required, matching_preferred].concat(),
        missing_required_skills: missing_required,
        missing_preferred_skills: missing_preferred,
        experience_gap,
        experience_level_match,
        matching_technologies: [matching_languages.as_slice(), matching_frameworks.as_slice()].concat(),
        missing_technologies: [missing_languages.as_slice(), missing_frameworks.as_slice()].concat(),
        matching_languages,
        missing_languages,
        matching_frameworks,
        missing_frameworks,
        matching_databases,
        missing_databases,
        matching_cloud_platforms: matching_cloud,
        missing_cloud_platforms: missing_cloud,
        recommendations: Vec::new(),
        improvement_priority: Vec::new(),
    };

    result.recommendations = generate_recommendations(&result);
    result.improvement_priority = calculate_priority_scores(&result);
    result
}

/// Years the resume falls short of the requirement.
///
/// `None` when the job states no requirement (absent or zero). A resume with
/// no stated years is assumed to have [`ASSUMED_RESUME_YEARS`]. Never negative.
pub fn calculate_experience_gap(resume_years: Option<u32>, required_years: Option<u32>) -> Option<u32> {
    let required = required_years.filter(|&years| years > 0)?;
    let resume = resume_years.unwrap_or(ASSUMED_RESUME_YEARS);
    Some(required.saturating_sub(resume))
}

fn level_rank(level: &str) -> u8 {
    match level.trim().to_lowercase().as_str() {
        "entry" | "junior" => 1,
        "mid" | "intermediate" => 2,
        "senior" => 3,
        "lead" | "principal" => 4,
        "executive" => 5,
        _ => 1,
    }
}

/// True when the resume's seniority is at least the job's. Case-insensitive;
/// unknown levels rank as entry.
pub fn check_experience_level_match(resume_level: &str, job_level: &str) -> bool {
    level_rank(resume_level) >= level_rank(job_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceEntry;

    fn sample_resume() -> ParsedResume {
        ParsedResume {
            programming_languages: vec!["Python".into(), "JavaScript".into(), "Java".into()],
            skills: vec![
                "React".into(),
                "Django".into(),
                "PostgreSQL".into(),
                "Git".into(),
                "Docker".into(),
            ],
            experience: vec![
                ExperienceEntry {
                    title: Some("Software Engineer".into()),
                    company: Some("TechCorp".into()),
                    content: "Developed web applications using React and Django. Worked with \
                              PostgreSQL databases and deployed using Docker on AWS."
                        .into(),
                },
                ExperienceEntry {
                    title: Some("Junior Developer".into()),
                    company: Some("StartupXYZ".into()),
                    content: "Built REST APIs using FastAPI and worked with MongoDB. Used Git \
                              for version control."
                        .into(),
                },
            ],
            ..Default::default()
        }
    }

    fn sample_requirements() -> JobRequirements {
        JobRequirements {
            required_skills: vec!["Python".into(), "JavaScript".into(), "React".into(), "AWS".into()],
            preferred_skills: vec!["TypeScript".into(), "GraphQL".into(), "Redis".into()],
            programming_languages: vec!["Python".into(), "JavaScript".into(), "TypeScript".into()],
            frameworks: vec!["React".into(), "Node.js".into(), "FastAPI".into()],
            databases: vec!["PostgreSQL".into(), "MongoDB".into(), "Redis".into()],
            cloud_platforms: vec!["AWS".into(), "Azure".into()],
            tools: vec!["Docker".into(), "Kubernetes".into(), "Git".into()],
            required_experience_years: Some(3),
            experience_level: "mid".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_analyze_gap_comprehensive() {
        let result = analyze_gap(&sample_resume(), &sample_requirements());

        assert!((0.0..=1.0).contains(&result.overall_match_score));
        assert!(result.matching_skills.contains(&"python".to_string()));
        assert!(result.matching_skills.contains(&"javascript".to_string()));
        assert!(result.matching_skills.contains(&"react".to_string()));
        assert!(result.matching_skills.contains(&"aws".to_string()));

        assert_eq!(result.matching_languages, vec!["python", "javascript"]);
        assert_eq!(result.missing_languages, vec!["typescript"]);
        assert_eq!(result.matching_frameworks, vec!["react", "fastapi"]);
        assert_eq!(result.missing_frameworks, vec!["node.js"]);
        assert_eq!(result.matching_databases, vec!["postgresql", "mongodb"]);
        assert_eq!(result.missing_databases, vec!["redis"]);
        assert_eq!(result.matching_cloud_platforms, vec!["aws"]);
        assert_eq!(result.missing_cloud_platforms, vec!["azure"]);

        assert_eq!(result.matching_technologies, vec!["python", "javascript", "react", "fastapi"]);
        assert_eq!(result.missing_technologies, vec!["typescript", "node.js"]);

        // 4 required + 2 languages + 2 frameworks matched out of 4 + 3 + 3
        assert!((result.overall_match_score - 0.8).abs() < 1e-9);

        // no stated resume years: assumed 2 against 3 required
        assert_eq!(result.experience_gap, Some(1));
        assert!(result.experience_level_match);

        assert!(!result.recommendations.is_empty());
        assert!(!result.improvement_priority.is_empty());
    }

    #[test]
    fn test_perfect_match() {
        let resume = ParsedResume {
            programming_languages: vec!["Python".into(), "JavaScript".into()],
            skills: vec!["React".into()],
            years_of_experience: Some(5),
            experience_level: Some("senior".into()),
            ..Default::default()
        };
        let requirements = JobRequirements {
            required_skills: vec!["Python".into(), "JavaScript".into()],
            programming_languages: vec!["Python".into(), "JavaScript".into()],
            frameworks: vec!["React".into()],
            required_experience_years: Some(3),
            experience_level: "senior".into(),
            ..Default::default()
        };

        let result = analyze_gap(&resume, &requirements);
        assert_eq!(result.overall_match_score, 1.0);
        assert!(result.missing_required_skills.is_empty());
        assert_eq!(result.experience_gap, Some(0));
        assert!(result.experience_level_match);
        assert!(result.recommendations.is_empty());
        assert!(result.improvement_priority.is_empty());
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let result = analyze_gap(&sample_resume(), &JobRequirements::default());
        assert_eq!(result.overall_match_score, 0.0);
        assert!(result.matching_skills.is_empty());
        assert!(result.missing_required_skills.is_empty());
        assert_eq!(result.experience_gap, None);
        // default resume level "mid" meets the default job level "entry"
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_blank_only_requirements_score_zero() {
        let requirements = JobRequirements {
            required_skills: vec!["  ".into(), "!!".into()],
            ..Default::default()
        };
        let result = analyze_gap(&sample_resume(), &requirements);
        assert_eq!(result.overall_match_score, 0.0);
        assert!(result.missing_required_skills.is_empty());
    }

    #[test]
    fn test_empty_resume() {
        let result = analyze_gap(&ParsedResume::default(), &sample_requirements());
        assert_eq!(result.overall_match_score, 0.0);
        assert!(result.matching_skills.is_empty());
        assert_eq!(result.missing_required_skills.len(), 4);
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_experience_gap() {
        assert_eq!(calculate_experience_gap(Some(2), Some(5)), Some(3));
        assert_eq!(calculate_experience_gap(Some(7), Some(5)), Some(0));
        assert_eq!(calculate_experience_gap(Some(3), None), None);
        assert_eq!(calculate_experience_gap(None, None), None);
        assert_eq!(calculate_experience_gap(None, Some(5)), Some(3));
        assert_eq!(calculate_experience_gap(Some(4), Some(0)), None);
        assert_eq!(calculate_experience_gap(Some(0), Some(5)), Some(5));
    }

    #[test]
    fn test_experience_level_match() {
        assert!(check_experience_level_match("senior", "senior"));
        assert!(check_experience_level_match("senior", "mid"));
        assert!(check_experience_level_match("lead", "senior"));
        assert!(!check_experience_level_match("entry", "senior"));
        assert!(!check_experience_level_match("mid", "lead"));
        assert!(check_experience_level_match("SENIOR", "senior"));
        assert!(check_experience_level_match("astronaut", "entry"));
        assert!(!check_experience_level_match("astronaut", "mid"));
    }

    #[test]
    fn test_level_hierarchy_is_monotonic() {
        let levels = ["entry", "junior", "mid", "intermediate", "senior", "lead", "principal", "executive"];
        for (i, level) in levels.iter().enumerate() {
            for lower in &levels[..=i] {
                assert!(check_experience_level_match(level, lower), "{level} vs {lower}");
            }
            for higher in &levels[i + 1..] {
                if level_rank(higher) > level_rank(level) {
                    assert!(!check_experience_level_match(level, higher), "{level} vs {higher}");
                }
            }
        }
    }

    #[test]
    fn test_resume_level_overrides_default() {
        let resume = ParsedResume {
            experience_level: Some("entry".into()),
            ..Default::default()
        };
        let requirements = JobRequirements {
            experience_level: "mid".into(),
            ..Default::default()
        };
        assert!(!analyze_gap(&resume, &requirements).experience_level_match);
        assert!(analyze_gap(&ParsedResume::default(), &requirements).experience_level_match);
    }

    #[test]
    fn test_score_is_bounded() {
        let requirements = JobRequirements {
            required_skills: vec!["Python".into(), "Python".into(), "py".into()],
            ..Default::default()
        };
        let resume = ParsedResume {
            skills: vec!["python3".into()],
            ..Default::default()
        };
        let result = analyze_gap(&resume, &requirements);
        assert!((0.0..=1.0).contains(&result.overall_match_score));
        assert_eq!(result.overall_match_score, 1.0);
    }
}
