//! Structured job requirements as consumed by gap analysis.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::lenient;

pub const EXPERIENCE_LEVELS: &[&str] = &["entry", "mid", "senior", "executive"];
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "entry";

/// Requirements extracted from a job description.
///
/// Every field has a default so partial LLM output still deserializes:
/// lists default to empty, optionals to `None`, `experience_level` to "entry".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequirements {
    #[serde(deserialize_with = "lenient::string_list")]
    pub required_skills: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub preferred_skills: Vec<String>,
    #[serde(deserialize_with = "lenient::years")]
    pub required_experience_years: Option<u32>,
    /// One of "entry", "mid", "senior", "executive".
    #[serde(deserialize_with = "level_or_default")]
    pub experience_level: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub programming_languages: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub frameworks: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub databases: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub cloud_platforms: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub tools: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub education_requirements: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub responsibilities: Vec<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub company_size: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub industry: Option<String>,
    /// One of "remote", "hybrid", "onsite".
    #[serde(deserialize_with = "lenient::optional_string")]
    pub work_location: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub salary_range: Option<String>,
}

impl Default for JobRequirements {
    fn default() -> Self {
        Self {
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
            required_experience_years: None,
            experience_level: DEFAULT_EXPERIENCE_LEVEL.to_string(),
            technologies: Vec::new(),
            programming_languages: Vec::new(),
            frameworks: Vec::new(),
            databases: Vec::new(),
            cloud_platforms: Vec::new(),
            tools: Vec::new(),
            certifications: Vec::new(),
            education_requirements: Vec::new(),
            responsibilities: Vec::new(),
            company_size: None,
            industry: None,
            work_location: None,
            salary_range: None,
        }
    }
}

impl JobRequirements {
    /// Removes duplicate list entries (first occurrence wins) and coerces an
    /// unknown experience level to "entry".
    pub fn validate(mut self) -> Self {
        for list in [
            &mut self.required_skills,
            &mut self.preferred_skills,
            &mut self.technologies,
            &mut self.programming_languages,
            &mut self.frameworks,
            &mut self.databases,
            &mut self.cloud_platforms,
            &mut self.tools,
        ] {
            dedup_in_place(list);
        }

        let level = self.experience_level.trim().to_lowercase();
        self.experience_level = if EXPERIENCE_LEVELS.contains(&level.as_str()) {
            level
        } else {
            DEFAULT_EXPERIENCE_LEVEL.to_string()
        };

        self
    }

    /// Completeness of the extraction in `[0, 1]`.
    pub fn confidence_score(&self) -> f64 {
        const MAX_SCORE: f64 = 10.0;

        let checks = [
            (!self.required_skills.is_empty(), 1.0),
            (!self.programming_languages.is_empty(), 1.0),
            (self.experience_level != DEFAULT_EXPERIENCE_LEVEL, 1.0),
            (self.required_experience_years.is_some_and(|y| y > 0), 1.0),
            (!self.technologies.is_empty(), 1.0),
            (!self.frameworks.is_empty(), 1.0),
            (!self.responsibilities.is_empty(), 2.0),
            (!self.education_requirements.is_empty(), 1.0),
            (self.work_location.is_some(), 1.0),
        ];

        let score: f64 = checks
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, weight)| weight)
            .sum();

        (score / MAX_SCORE).min(1.0)
    }
}

fn level_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::optional_string(deserializer)?
        .unwrap_or_else(|| DEFAULT_EXPERIENCE_LEVEL.to_string()))
}

fn dedup_in_place(list: &mut Vec<String>) {
    let mut seen = HashSet::new();
    list.retain(|item| seen.insert(item.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_entry() {
        assert_eq!(JobRequirements::default().experience_level, "entry");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"required_skills": ["Python"], "required_experience_years": 5}"#;
        let req: JobRequirements = serde_json::from_str(json).unwrap();
        assert_eq!(req.required_skills, vec!["Python"]);
        assert_eq!(req.required_experience_years, Some(5));
        assert_eq!(req.experience_level, "entry");
        assert!(req.frameworks.is_empty());
    }

    #[test]
    fn test_years_are_read_leniently() {
        let parse = |raw: &str| {
            serde_json::from_str::<JobRequirements>(&format!(
                r#"{{"required_experience_years": {raw}}}"#
            ))
            .unwrap()
            .required_experience_years
        };
        assert_eq!(parse("3"), Some(3));
        assert_eq!(parse("4.0"), Some(4));
        assert_eq!(parse(r#""5+""#), Some(5));
        assert_eq!(parse("-2"), None);
        assert_eq!(parse("null"), None);
        assert_eq!(parse(r#""several""#), None);
    }

    #[test]
    fn test_null_and_mixed_values_are_tolerated() {
        let json = r#"{
            "required_skills": ["Rust", null, 7, "SQL"],
            "frameworks": null,
            "experience_level": null,
            "industry": 12
        }"#;
        let req: JobRequirements = serde_json::from_str(json).unwrap();
        assert_eq!(req.required_skills, vec!["Rust", "SQL"]);
        assert!(req.frameworks.is_empty());
        assert_eq!(req.experience_level, "entry");
        assert!(req.industry.is_none());
    }

    #[test]
    fn test_validate_dedupes_lists() {
        let req = JobRequirements {
            required_skills: vec!["Python".into(), "JavaScript".into(), "Python".into()],
            preferred_skills: vec!["Docker".into(), "Kubernetes".into(), "Docker".into()],
            programming_languages: vec!["Python".into(), "JavaScript".into(), "Python".into()],
            frameworks: vec!["React".into(), "Django".into(), "React".into()],
            experience_level: "invalid_level".into(),
            ..Default::default()
        }
        .validate();

        assert_eq!(req.required_skills, vec!["Python", "JavaScript"]);
        assert_eq!(req.preferred_skills.len(), 2);
        assert_eq!(req.programming_languages.len(), 2);
        assert_eq!(req.frameworks, vec!["React", "Django"]);
        assert_eq!(req.experience_level, "entry");
    }

    #[test]
    fn test_validate_normalizes_level_case() {
        let req = JobRequirements {
            experience_level: " Senior ".into(),
            ..Default::default()
        }
        .validate();
        assert_eq!(req.experience_level, "senior");
    }

    #[test]
    fn test_confidence_empty_is_zero() {
        assert_eq!(JobRequirements::default().confidence_score(), 0.0);
    }

    #[test]
    fn test_confidence_full_is_one() {
        let req = JobRequirements {
            required_skills: vec!["Python".into()],
            programming_languages: vec!["Python".into()],
            experience_level: "senior".into(),
            required_experience_years: Some(5),
            technologies: vec!["Docker".into()],
            frameworks: vec!["React".into()],
            responsibilities: vec!["Ship features".into()],
            education_requirements: vec!["BS CS".into()],
            work_location: Some("remote".into()),
            ..Default::default()
        };
        assert!((req.confidence_score() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_confidence_partial() {
        let req = JobRequirements {
            programming_languages: vec!["Python".into()],
            responsibilities: vec!["Ship features".into()],
            ..Default::default()
        };
        assert!((req.confidence_score() - 0.3).abs() < 1e-9);
    }
}
