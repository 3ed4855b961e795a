//! Merges the parser's categorized lists with
//! technology mentions scanned out of free-text experience entries.

use std::collections::HashSet;

use crate::models::resume::ParsedResume;

/// Technologies recognized in free text. Matching is a case-insensitive
/// substring scan (see `mentions`), so names like "java" also hit inside
/// "javascript".
pub const TECH_VOCABULARY: &[&str] = &[
    // languages
    "python", "javascript", "java", "typescript", "php", "ruby", "go", "rust",
    "kotlin", "swift", "scala", "c++", "c#", "graphql",
    // frameworks
    "react", "angular", "vue", "nodejs", "node.js", "express", "django", "flask",
    "fastapi", "spring", "rails", "laravel", "nextjs", "next.js", "pytorch",
    "tensorflow", "pandas", "numpy",
    // databases
    "postgresql", "mysql", "mongodb", "redis", "sqlite", "elasticsearch",
    "cassandra", "dynamodb", "oracle",
    // cloud
    "aws", "azure", "gcp", "heroku",
    // tooling
    "docker", "kubernetes", "terraform", "ansible", "jenkins", "kafka",
    "rabbitmq", "linux", "git", "jira", "confluence", "slack", "figma",
    "postman",
];

/// True when lower-cased `text` mentions `term`.
///
/// Plain substring search, except that short purely alphanumeric terms
/// ("go", "r", "sql", "aws") must stand alone as a word; otherwise "go" would
/// match "good" and "r" nearly every sentence.
pub fn mentions(text: &str, term: &str) -> bool {
    let is_short_word = term.chars().count() <= 3 && term.chars().all(char::is_alphanumeric);
    if !is_short_word {
        return text.contains(term);
    }

    text.match_indices(term).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Returns every vocabulary entry that occurs in `text`, in vocabulary order.
pub fn extract_technologies_from_text(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let text = text.to_lowercase();
    TECH_VOCABULARY
        .iter()
        .filter(|tech| mentions(&text, tech))
        .map(|tech| tech.to_string())
        .collect()
}

/// Collects raw (non-normalized) skills from a parsed resume: the
/// `programming_languages` and `skills` lists plus technologies mentioned in
/// experience entries. Blank entries are dropped and duplicates removed.
pub fn extract_skills_from_resume(resume: &ParsedResume) -> Vec<String> {
    let structured = resume
        .programming_languages
        .iter()
        .chain(resume.skills.iter())
        .cloned();

    let from_text = resume
        .experience
        .iter()
        .flat_map(|exp| extract_technologies_from_text(&exp.content));

    let mut seen = HashSet::new();
    structured
        .chain(from_text)
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .filter(|skill| seen.insert(skill.clone()))
        .collect()
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

    #[test]
    fn test_mentions_requires_word_boundary_for_short_terms() {
        assert!(mentions("we write go and rust", "go"));
        assert!(!mentions("a good google engineer", "go"));
        assert!(mentions("deployed on aws.", "aws"));
        assert!(!mentions("laws and bylaws", "aws"));
        assert!(mentions("python, javascript", "java"));
        assert!(mentions("c++ and c#", "c++"));
    }

    #[test]
    fn test_extract_technologies_from_text() {
        let text = "Developed web applications using React and Django framework. \
                    Worked with PostgreSQL databases and deployed using Docker on AWS. \
                    Used Git for version control and Jenkins for CI/CD.";
        let techs = extract_technologies_from_text(text);
        for expected in ["react", "django", "postgresql", "docker", "aws", "git", "jenkins"] {
            assert!(techs.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_extract_technologies_from_blank_text() {
        assert!(extract_technologies_from_text("").is_empty());
        assert!(extract_technologies_from_text("   \n").is_empty());
    }

    #[test]
    fn test_extract_skills_from_resume_merges_sources() {
        let skills = extract_skills_from_resume(&sample_resume());

        for expected in ["Python", "JavaScript", "Java", "React", "Django", "PostgreSQL"] {
            assert!(skills.contains(&expected.to_string()), "missing {expected}");
        }
        for expected in ["aws", "fastapi", "mongodb"] {
            assert!(skills.contains(&expected.to_string()), "missing {expected}");
        }

        let unique: HashSet<_> = skills.iter().collect();
        assert_eq!(unique.len(), skills.len());
    }

    #[test]
    fn test_extract_skills_from_empty_resume() {
        assert!(extract_skills_from_resume(&ParsedResume::default()).is_empty());
    }

    #[test]
    fn test_extract_skills_drops_blank_entries() {
        let resume = ParsedResume {
            skills: vec!["  ".into(), " Rust ".into(), "Rust".into()],
            ..Default::default()
        };
        assert_eq!(extract_skills_from_resume(&resume), vec!["Rust"]);
    }
}
