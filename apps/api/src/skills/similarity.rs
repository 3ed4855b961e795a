//! Decides whether two raw skill strings denote the same skill.
//!
//! Tests run on normalized forms and short-circuit on the first success:
//! 1. exact match
//! 2. shared synonym group
//! 3. LCS ratio ≥ threshold
//! 4. containment (one is a substring of the other)
//!
//! A skill that is blank after normalization never matches anything,
//! not even another blank skill.

use crate::skills::normalizer::normalize_skill;
use crate::skills::synonyms::share_synonym_group;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

pub fn are_skills_similar(skill1: &str, skill2: &str, threshold: f64) -> bool {
    let a = normalize_skill(skill1);
    let b = normalize_skill(skill2);
    let (a, b) = (a.as_str(), b.as_str());

    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    if share_synonym_group(a, b) {
        return true;
    }

    if lcs_ratio(a, b) >= threshold {
        return true;
    }

    a.contains(b) || b.contains(a)
}

/// Character-level similarity `2·LCS / (|a| + |b|)`, in `[0, 1]`.
/// Two empty strings are defined as 0.0.
pub fn lcs_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    (2 * lcs_len(&a, &b)) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Splits `job_skills` into (matching, missing) against `resume_skills`.
///
/// Both output lists hold normalized job skills in job order. Job skills that
/// are blank after normalization are dropped rather than reported missing.
pub fn find_skill_matches<R, J>(resume_skills: &[R], job_skills: &[J]) -> (Vec<String>, Vec<String>)
where
    R: AsRef<str>,
    J: AsRef<str>,
{
    let normalized_resume: Vec<String> = resume_skills
        .iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();

    let mut matching = Vec::new();
    let mut missing = Vec::new();

    for job_skill in job_skills {
        let job_skill = normalize_skill(job_skill.as_ref());
        if job_skill.is_empty() {
            continue;
        }

        // normalization is idempotent, so normalized inputs compare as raw ones
        let found = normalized_resume.iter().any(|resume_skill| {
            are_skills_similar(&job_skill, resume_skill, DEFAULT_SIMILARITY_THRESHOLD)
        });

        if found {
            matching.push(job_skill);
        } else {
            missing.push(job_skill);
        }
    }

    (matching, missing)
}
