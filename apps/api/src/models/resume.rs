use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::lenient;

/// A stored resume. Upload and text extraction happen upstream; this service
/// only reads the parsed breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub user_id: i64,
    pub filename: String,
    pub is_processed: bool,
    pub raw_text: Option<String>,
    pub parsed_data: Option<Json<ParsedResume>>,
    pub created_at: DateTime<Utc>,
}

impl ResumeRow {
    /// The parsed breakdown, or an empty one when parsing produced nothing.
    pub fn parsed(&self) -> ParsedResume {
        self.parsed_data
            .as_ref()
            .map(|json| json.0.clone())
            .unwrap_or_default()
    }
}

/// Structured breakdown of a resume as produced by the document parser.
///
/// Every field is optional on the wire and defaults to empty, so a parser that
/// only fills in some sections still deserializes. `null` strings and list
/// items of the wrong type are dropped rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    #[serde(deserialize_with = "lenient::or_default")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient::string_list")]
    pub programming_languages: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient::entry_list")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::entry_list")]
    pub education: Vec<SectionEntry>,
    #[serde(deserialize_with = "lenient::entry_list")]
    pub projects: Vec<SectionEntry>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub summary: Option<String>,
    /// Total years of professional experience, when the parser could tell.
    #[serde(deserialize_with = "lenient::years")]
    pub years_of_experience: Option<u32>,
    /// Self-reported or inferred seniority ("entry", "mid", "senior", ...).
    #[serde(deserialize_with = "lenient::optional_string")]
    pub experience_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::optional_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionEntry {
    #[serde(deserialize_with = "lenient::string_or_empty")]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_resume_accepts_partial_payload() {
        let json = r#"{
            "programming_languages": ["Python"],
            "experience": [{"title": "Engineer", "content": "Built APIs"}]
        }"#;
        let parsed: ParsedResume = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.programming_languages, vec!["Python"]);
        assert!(parsed.skills.is_empty());
        assert_eq!(parsed.experience[0].content, "Built APIs");
        assert!(parsed.experience[0].company.is_none());
        assert!(parsed.years_of_experience.is_none());
    }

    #[test]
    fn test_parsed_resume_accepts_empty_object() {
        let parsed: ParsedResume = serde_json::from_str("{}").unwrap();
        assert!(parsed.experience.is_empty());
        assert!(parsed.personal_info.email.is_none());
    }

    #[test]
    fn test_null_entry_content_becomes_empty() {
        let parsed: ParsedResume =
            serde_json::from_str(r#"{"experience":[{"content":null}]}"#).unwrap();
        assert_eq!(parsed.experience.len(), 1);
        assert_eq!(parsed.experience[0].content, "");
    }

    #[test]
    fn test_non_string_skills_are_dropped() {
        let parsed: ParsedResume =
            serde_json::from_str(r#"{"skills":["Python", null, 3]}"#).unwrap();
        assert_eq!(parsed.skills, vec!["Python"]);
    }

    #[test]
    fn test_malformed_sections_fall_back_to_empty() {
        let json = r#"{
            "personal_info": null,
            "education": [{"content": "BS CS"}, "MIT", null],
            "summary": 42,
            "years_of_experience": "6+"
        }"#;
        let parsed: ParsedResume = serde_json::from_str(json).unwrap();
        assert!(parsed.personal_info.name.is_none());
        assert_eq!(parsed.education.len(), 1);
        assert!(parsed.summary.is_none());
        assert_eq!(parsed.years_of_experience, Some(6));
    }
}
