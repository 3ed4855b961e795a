//! Rule-based requirement extraction, used when no LLM provider is configured
//! or all of them failed. Regex and keyword scans only; the same text always
//! yields the same requirements.

use std::sync::LazyLock;

use regex::Regex;

use crate::job_analysis::requirements::JobRequirements;
use crate::skills::extractor::mentions;

/// Seniority tiers, checked in order; the first tier with a hit wins.
const LEVEL_TIERS: &[(&str, &[&str])] = &[
    ("senior", &["senior", "sr.", "lead", "principal"]),
    ("mid", &["mid-level", "intermediate", "3+ years", "4+ years"]),
    ("entry", &["entry", "junior", "new grad", "recent graduate"]),
];

const LOCATION_TIERS: &[(&str, &[&str])] = &[
    ("remote", &["remote", "work from home", "wfh"]),
    ("hybrid", &["hybrid", "flexible"]),
    ("onsite", &["on-site", "onsite", "office"]),
];

const PROGRAMMING_LANGUAGES: &[&str] = &[
    "python", "javascript", "java", "c++", "c#", "php", "ruby", "go", "rust",
    "typescript", "swift", "kotlin", "scala", "r", "matlab", "sql",
];

const FRAMEWORKS: &[&str] = &[
    "react", "angular", "vue", "nodejs", "express", "django", "flask", "spring",
    "rails", "laravel", "fastapi", "nextjs", "nuxt",
];

const DATABASES: &[&str] = &[
    "postgresql", "mysql", "mongodb", "redis", "sqlite", "oracle", "cassandra",
    "elasticsearch", "dynamodb",
];

const CLOUD_PLATFORMS: &[&str] = &["aws", "azure", "gcp", "google cloud", "heroku", "digitalocean"];

/// Cloud platforms reported as acronyms rather than title case.
const UPPERCASE_PLATFORMS: &[&str] = &["aws", "gcp"];

const TOOLS: &[&str] = &[
    "git", "docker", "kubernetes", "jenkins", "terraform", "ansible", "jira",
    "confluence", "slack", "figma", "postman",
];

/// "N years" patterns, tried in order. Only the first hit is used: a text that
/// mentions several different numbers is not reconciled.
static YEARS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d+)\+?\s*years?\s*(?:of\s*)?experience",
        r"(\d+)\+?\s*years?\s*(?:in|with)",
        r"minimum\s*(\d+)\s*years?",
        r"(\d+)\+\s*years?",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Boilerplate that ends the useful part of a posting; everything from the
/// first hit onward is dropped.
static BOILERPLATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)apply now.*$",
        r"(?i)submit.*?resume.*$",
        r"(?i)equal opportunity employer.*$",
        r"(?i)we are an equal.*$",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Collapses whitespace and strips trailing application boilerplate.
pub fn clean_job_description(job_description: &str) -> String {
    let mut cleaned = job_description.split_whitespace().collect::<Vec<_>>().join(" ");

    for pattern in BOILERPLATE_PATTERNS.iter() {
        cleaned = pattern.replace(&cleaned, "").into_owned();
    }

    cleaned.trim().to_string()
}

/// Extracts requirements from raw text by keyword and regex scans.
/// Never fails: unrecognized text yields empty lists and the "entry" level.
pub fn extract_basic_requirements(job_description: &str) -> JobRequirements {
    let text = job_description.to_lowercase();

    let mut requirements = JobRequirements::default();

    if let Some(level) = first_tier(&text, LEVEL_TIERS) {
        requirements.experience_level = level.to_string();
    }

    requirements.required_experience_years = extract_years(&text);

    requirements.programming_languages = scan(&text, PROGRAMMING_LANGUAGES, title_case);

    requirements.frameworks = FRAMEWORKS
        .iter()
        .filter(|fw| mentions(&text, fw) || (fw.ends_with("js") && text.contains(&dotted_js(fw))))
        .map(|fw| title_case(fw))
        .collect();

    requirements.databases = scan(&text, DATABASES, title_case);

    requirements.cloud_platforms = scan(&text, CLOUD_PLATFORMS, |platform| {
        if UPPERCASE_PLATFORMS.contains(&platform) {
            platform.to_uppercase()
        } else {
            title_case(platform)
        }
    });

    requirements.tools = scan(&text, TOOLS, title_case);

    requirements.work_location = first_tier(&text, LOCATION_TIERS).map(str::to_string);

    requirements
}

fn first_tier(text: &str, tiers: &[(&'static str, &[&str])]) -> Option<&'static str> {
    tiers
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| text.contains(term)))
        .map(|(label, _)| *label)
}

fn extract_years(text: &str) -> Option<u32> {
    YEARS_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn scan(text: &str, vocabulary: &[&str], format: impl Fn(&str) -> String) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|term| mentions(text, term))
        .map(|term| format(term))
        .collect()
}

/// "nodejs" → "node.js"
fn dotted_js(name: &str) -> String {
    format!("{}.js", name.trim_end_matches("js"))
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest:
/// "google cloud" → "Google Cloud", "c++" → "C++", "nextjs" → "Nextjs".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENIOR_JD: &str = r#"
        Senior Software Engineer - Full Stack

        We are looking for a Senior Software Engineer to join our team.

        Requirements:
        - 5+ years of experience in software development
        - Strong proficiency in Python, JavaScript, and TypeScript
        - Experience with React, Node.js, and FastAPI
        - Knowledge of PostgreSQL and Redis
        - AWS cloud experience required
        - Experience with Docker and Kubernetes

        Location: Remote/San Francisco
    "#;

    #[test]
    fn test_senior_engineer_scenario() {
        let req = extract_basic_requirements(SENIOR_JD);

        assert_eq!(req.experience_level, "senior");
        assert_eq!(req.required_experience_years, Some(5));
        assert!(req.programming_languages.contains(&"Python".to_string()));
        assert!(req.programming_languages.contains(&"Javascript".to_string()));
        assert!(req.frameworks.contains(&"React".to_string()));
        assert!(req.frameworks.contains(&"Nodejs".to_string()));
        assert!(req.databases.contains(&"Postgresql".to_string()));
        assert!(req.cloud_platforms.contains(&"AWS".to_string()));
        assert!(req.tools.contains(&"Docker".to_string()));
        assert_eq!(req.work_location.as_deref(), Some("remote"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        assert_eq!(
            extract_basic_requirements(SENIOR_JD),
            extract_basic_requirements(SENIOR_JD)
        );
    }

    #[test]
    fn test_empty_text_yields_defaults() {
        let req = extract_basic_requirements("");
        assert_eq!(req, JobRequirements::default());
    }

    #[test]
    fn test_level_tiers_first_match_wins() {
        assert_eq!(extract_basic_requirements("Lead developer, junior welcome").experience_level, "senior");
        assert_eq!(extract_basic_requirements("Mid-level backend role").experience_level, "mid");
        assert_eq!(extract_basic_requirements("Junior analyst").experience_level, "entry");
        assert_eq!(extract_basic_requirements("Backend developer").experience_level, "entry");
    }

    #[test]
    fn test_years_patterns() {
        assert_eq!(extract_years("3 years of experience"), Some(3));
        assert_eq!(extract_years("7 years with rust"), Some(7));
        assert_eq!(extract_years("minimum 2 years"), Some(2));
        assert_eq!(extract_years("10+ years"), Some(10));
        assert_eq!(extract_years("several years"), None);
    }

    #[test]
    fn test_years_first_pattern_wins_over_later_numbers() {
        // Both numbers appear; the first pattern in priority order decides.
        let text = "8+ years total, at least 3 years of experience with python";
        assert_eq!(extract_years(text), Some(3));
    }

    #[test]
    fn test_short_language_names_need_word_boundaries() {
        let req = extract_basic_requirements("A good engineer who writes Go and R");
        assert!(req.programming_languages.contains(&"Go".to_string()));
        assert!(req.programming_languages.contains(&"R".to_string()));

        let req = extract_basic_requirements("A good engineer");
        assert!(req.programming_languages.is_empty());
    }

    #[test]
    fn test_dotted_js_frameworks() {
        let req = extract_basic_requirements("Experience with Next.js");
        assert_eq!(req.frameworks, vec!["Nextjs"]);
    }

    #[test]
    fn test_cloud_platform_casing() {
        let req = extract_basic_requirements("AWS, GCP, Google Cloud and Heroku");
        assert_eq!(req.cloud_platforms, vec!["AWS", "GCP", "Google Cloud", "Heroku"]);
    }

    #[test]
    fn test_location_tiers() {
        assert_eq!(extract_basic_requirements("Hybrid schedule").work_location.as_deref(), Some("hybrid"));
        assert_eq!(extract_basic_requirements("Onsite in Berlin").work_location.as_deref(), Some("onsite"));
        assert_eq!(extract_basic_requirements("Berlin").work_location, None);
    }

    #[test]
    fn test_clean_job_description_strips_boilerplate() {
        let messy = "

            Job Title: Software Engineer

            We are looking for a software engineer.

            Apply now by submitting your resume to jobs@company.com

            We are an equal opportunity employer.
        ";
        let cleaned = clean_job_description(messy);
        assert_eq!(
            cleaned,
            "Job Title: Software Engineer We are looking for a software engineer."
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("javascript"), "Javascript");
        assert_eq!(title_case("google cloud"), "Google Cloud");
        assert_eq!(title_case("c#"), "C#");
    }
}
