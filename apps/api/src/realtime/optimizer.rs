//! Rule-based suggestions for a resume section while it is being edited.
//!
//! Each call looks at the changed section plus the whole resume and returns
//! at most [`MAX_SUGGESTIONS`] suggestions together with ATS, overall and
//! industry alignment scores. Results are memoized in a [`SuggestionCache`].

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Instant;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::industry::{detect_industry, industry_alignment, IndustryType};
use crate::job_analysis::requirements::JobRequirements;
use crate::models::resume::ParsedResume;
use crate::optimization::ats::keyword_density;
use crate::realtime::cache::{cache_key, SuggestionCache};

pub const MAX_SUGGESTIONS: usize = 10;
pub const MAX_QUICK_WINS: usize = 5;

/// Content quality and structure are not analyzed yet and contribute fixed
/// baseline scores.
const BASELINE_CONTENT_SCORE: f64 = 0.7;
const BASELINE_STRUCTURE_SCORE: f64 = 0.8;
const LOW_INDUSTRY_ALIGNMENT: f64 = 0.6;

const MIN_SUMMARY_CHARS: usize = 100;
const MIN_BULLETS: usize = 3;
const MIN_KEYWORD_MENTIONS: usize = 2;
const LOW_COVERAGE: f64 = 0.7;

pub const ACTION_VERBS: &[&str] = &[
    "led", "developed", "built", "designed", "implemented", "managed", "created",
    "improved", "increased", "reduced", "launched", "delivered", "optimized",
    "architected", "automated", "spearheaded", "established", "streamlined",
    "achieved", "drove",
];

const SKILL_CATEGORY_MARKERS: &[&str] = &["technical", "programming", "frameworks"];

/// A sentence ends at a newline or at a period followed by whitespace, so
/// dotted names like "Node.js" stay whole.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+|\n").expect("valid sentence pattern"));

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// An edit to one field of the resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentChange {
    /// "summary", "experience", "skills", ...
    pub section: String,
    pub field: String,
    #[serde(default)]
    pub old_value: String,
    pub new_value: String,
    #[serde(default)]
    pub cursor_position: usize,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealTimeAnalyzeRequest {
    pub change: ContentChange,
    #[serde(default)]
    pub current_resume: ParsedResume,
    #[serde(default)]
    pub job_requirements: JobRequirements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Content,
    Structure,
    Keyword,
    Achievement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationSuggestion {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub original_text: String,
    pub suggested_text: String,
    pub explanation: String,
    pub impact_score: f64,
    pub section: String,
    /// The suggested text can replace the original without review.
    pub auto_apply: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RealTimeOptimizationResult {
    pub suggestions: Vec<OptimizationSuggestion>,
    pub overall_score: f64,
    pub ats_score: f64,
    /// Required skill → occurrences in the resume; skills never mentioned are absent.
    pub keyword_density: BTreeMap<String, usize>,
    pub industry_alignment: f64,
    pub improvement_areas: Vec<String>,
    pub strengths: Vec<String>,
    pub quick_wins: Vec<String>,
    pub processing_time_ms: u64,
    pub cache_hit: bool,
}

/// Whole-resume scores against a job, independent of any single edit.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeInsights {
    pub overall_score: f64,
    pub ats_score: f64,
    pub industry_alignment: f64,
    pub keyword_density: BTreeMap<String, usize>,
    pub improvement_areas: Vec<String>,
    pub strengths: Vec<String>,
}

struct SuggestionDraft {
    kind: SuggestionKind,
    priority: Priority,
    title: &'static str,
    description: &'static str,
    original_text: String,
    suggested_text: String,
    explanation: &'static str,
    impact_score: f64,
    section: &'static str,
    auto_apply: bool,
}

impl From<SuggestionDraft> for OptimizationSuggestion {
    fn from(d: SuggestionDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: d.kind,
            priority: d.priority,
            title: d.title.to_string(),
            description: d.description.to_string(),
            original_text: d.original_text,
            suggested_text: d.suggested_text,
            explanation: d.explanation.to_string(),
            impact_score: d.impact_score,
            section: d.section.to_string(),
            auto_apply: d.auto_apply,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Serves the result from `cache` when an identical request was analyzed
/// before; otherwise analyzes and stores it. Cursor position, timestamp and
/// the previous value do not affect the key.
pub fn analyze_cached(
    cache: &SuggestionCache<RealTimeOptimizationResult>,
    request: &RealTimeAnalyzeRequest,
) -> Result<RealTimeOptimizationResult, serde_json::Error> {
    let start = Instant::now();
    let key = cache_key(&(
        &request.change.section,
        &request.change.field,
        &request.change.new_value,
        &request.current_resume,
        &request.job_requirements,
    ))?;

    if let Some(mut cached) = cache.get(&key) {
        debug!(section = %request.change.section, "Optimization cache hit");
        cached.cache_hit = true;
        cached.processing_time_ms = elapsed_ms(start);
        return Ok(cached);
    }

    let result = analyze_content_change(
        &request.change,
        &request.current_resume,
        &request.job_requirements,
    );
    cache.insert(key, result.clone());
    Ok(result)
}

pub fn analyze_content_change(
    change: &ContentChange,
    resume: &ParsedResume,
    requirements: &JobRequirements,
) -> RealTimeOptimizationResult {
    let start = Instant::now();

    let mut drafts = match change.section.as_str() {
        "summary" => analyze_summary(&change.new_value),
        "experience" => analyze_experience(&change.new_value),
        "skills" => analyze_skills(&change.new_value, &requirements.required_skills),
        _ => Vec::new(),
    };

    let text = resume_text(resume);
    drafts.extend(keyword_density_suggestion(&text, &requirements.required_skills));

    let (industry, _) = detect_industry(&job_context(requirements), "");
    let insights = resume_insights(resume, requirements, industry);

    let quick_wins = drafts
        .iter()
        .filter(|d| d.auto_apply || (d.impact_score > 0.7 && d.priority == Priority::High))
        .map(|d| d.title.to_string())
        .take(MAX_QUICK_WINS)
        .collect();

    // High priority first, then by impact; stable for ties.
    drafts.sort_by(|a, b| {
        let a_key = (a.priority == Priority::High, a.impact_score);
        let b_key = (b.priority == Priority::High, b.impact_score);
        b_key.0.cmp(&a_key.0).then(b_key.1.total_cmp(&a_key.1))
    });
    drafts.truncate(MAX_SUGGESTIONS);

    RealTimeOptimizationResult {
        suggestions: drafts.into_iter().map(Into::into).collect(),
        overall_score: insights.overall_score,
        ats_score: insights.ats_score,
        keyword_density: insights.keyword_density,
        industry_alignment: insights.industry_alignment,
        improvement_areas: insights.improvement_areas,
        strengths: insights.strengths,
        quick_wins,
        processing_time_ms: elapsed_ms(start),
        cache_hit: false,
    }
}

/// Scores the whole resume against `requirements` for a known industry.
pub fn resume_insights(
    resume: &ParsedResume,
    requirements: &JobRequirements,
    industry: IndustryType,
) -> ResumeInsights {
    let text = resume_text(resume);
    let coverage = keyword_coverage(&text, &requirements.required_skills);
    let alignment = industry_alignment(&text, industry);
    let has_digits = text.chars().any(|c| c.is_ascii_digit());

    ResumeInsights {
        overall_score: overall_score(coverage, alignment),
        ats_score: ats_score(coverage, resume),
        industry_alignment: alignment,
        keyword_density: keyword_density(&text, &requirements.required_skills),
        improvement_areas: improvement_areas(
            coverage,
            &requirements.required_skills,
            has_digits,
            alignment,
        ),
        strengths: strengths(resume, has_digits),
    }
}

/// Text used to detect the industry when only extracted requirements are at hand.
pub fn job_context(requirements: &JobRequirements) -> String {
    let mut parts: Vec<&str> = requirements.industry.as_deref().into_iter().collect();
    for list in [
        &requirements.required_skills,
        &requirements.preferred_skills,
        &requirements.technologies,
        &requirements.responsibilities,
    ] {
        parts.extend(list.iter().map(String::as_str));
    }
    parts.join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Section rules
// ────────────────────────────────────────────────────────────────────────────

fn analyze_summary(text: &str) -> Vec<SuggestionDraft> {
    let mut drafts = Vec::new();

    if text.chars().count() < MIN_SUMMARY_CHARS {
        drafts.push(SuggestionDraft {
            kind: SuggestionKind::Content,
            priority: Priority::Medium,
            title: "Expand Professional Summary",
            description: "Professional summary should be 3-4 sentences (150-200 words)",
            original_text: text.to_string(),
            suggested_text: format!(
                "{text} [Add more details about your experience and achievements]"
            ),
            explanation: "A comprehensive summary helps ATS systems and recruiters quickly \
                          understand your value proposition",
            impact_score: 0.6,
            section: "summary",
            auto_apply: false,
        });
    }

    if !text.chars().any(|c| c.is_ascii_digit()) {
        drafts.push(SuggestionDraft {
            kind: SuggestionKind::Achievement,
            priority: Priority::High,
            title: "Add Quantified Achievements",
            description: "Include specific numbers and metrics in your summary",
            original_text: text.to_string(),
            suggested_text: format!(
                "{text} [Add specific numbers like: 'X years experience', 'Y% improvement', \
                 'Z projects completed']"
            ),
            explanation: "Quantified achievements make your summary more compelling and memorable",
            impact_score: 0.7,
            section: "summary",
            auto_apply: false,
        });
    }

    drafts
}

/// Non-empty sentences of `text` with bullet markers removed.
pub(crate) fn sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_BREAK
        .split(text)
        .map(|s| s.trim().trim_start_matches(['•', '-', '*']).trim_start())
        .filter(|s| !s.is_empty())
}

fn is_bullet(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('•') || line.starts_with('-') || line.starts_with('*')
}

fn analyze_experience(text: &str) -> Vec<SuggestionDraft> {
    let mut drafts = Vec::new();

    let weak_start = sentences(text).any(|sentence| {
        let first = sentence
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        !ACTION_VERBS.contains(&first.as_str())
    });

    if weak_start {
        drafts.push(SuggestionDraft {
            kind: SuggestionKind::Content,
            priority: Priority::High,
            title: "Use Strong Action Verbs",
            description: "Start bullet points with strong action verbs",
            original_text: text.to_string(),
            suggested_text: format!(
                "Consider starting sentences with: {}",
                ACTION_VERBS[..5]
                    .iter()
                    .map(|v| title_word(v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            explanation: "Strong action verbs demonstrate ownership and impact",
            impact_score: 0.8,
            section: "experience",
            auto_apply: false,
        });
    }

    if text.lines().filter(|line| is_bullet(line)).count() < MIN_BULLETS {
        drafts.push(SuggestionDraft {
            kind: SuggestionKind::Structure,
            priority: Priority::Medium,
            title: "Add More Bullet Points",
            description: "Each role should have 3-5 bullet points highlighting key achievements",
            original_text: text.to_string(),
            suggested_text: format!("{text}\n• [Add another achievement or responsibility]"),
            explanation: "More bullet points provide better coverage of your experience and impact",
            impact_score: 0.6,
            section: "experience",
            auto_apply: false,
        });
    }

    drafts
}

fn analyze_skills(text: &str, required_skills: &[String]) -> Vec<SuggestionDraft> {
    let mut drafts = Vec::new();
    let lowered = text.to_lowercase();
    let current: Vec<&str> = lowered.split(',').map(str::trim).collect();

    let missing: Vec<&str> = required_skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|required| {
            let required = required.to_lowercase();
            !current.iter().any(|skill| skill.contains(&required))
        })
        .collect();

    if !missing.is_empty() {
        let additions = missing[..missing.len().min(3)].join(", ");
        let suggested_text = if text.trim().is_empty() {
            additions
        } else {
            format!("{text}, {additions}")
        };
        drafts.push(SuggestionDraft {
            kind: SuggestionKind::Keyword,
            priority: Priority::High,
            title: "Add Required Skills",
            description: "Include skills that are specifically required for this role",
            original_text: text.to_string(),
            suggested_text,
            explanation: "Adding required skills improves your match percentage and ATS compatibility",
            impact_score: 0.9,
            section: "skills",
            auto_apply: true,
        });
    }

    if text.contains(',') && !SKILL_CATEGORY_MARKERS.iter().any(|m| lowered.contains(m)) {
        drafts.push(SuggestionDraft {
            kind: SuggestionKind::Structure,
            priority: Priority::Medium,
            title: "Organize Skills by Category",
            description: "Group skills into categories (Technical, Programming, Frameworks, etc.)",
            original_text: text.to_string(),
            suggested_text: "Technical Skills: [programming languages]\nFrameworks: [frameworks]\nTools: [tools]"
                .to_string(),
            explanation: "Organized skills are easier to scan and more professional",
            impact_score: 0.5,
            section: "skills",
            auto_apply: false,
        });
    }

    drafts
}

fn keyword_density_suggestion(text: &str, required_skills: &[String]) -> Option<SuggestionDraft> {
    let sparse: Vec<&str> = required_skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| text.matches(s.to_lowercase().as_str()).count() < MIN_KEYWORD_MENTIONS)
        .take(3)
        .collect();

    if sparse.is_empty() {
        return None;
    }

    Some(SuggestionDraft {
        kind: SuggestionKind::Keyword,
        priority: Priority::High,
        title: "Increase Keyword Density",
        description: "Some required keywords appear infrequently in your resume",
        original_text: String::new(),
        suggested_text: format!("Consider mentioning these keywords more: {}", sparse.join(", ")),
        explanation: "Higher keyword density improves ATS ranking and shows deeper expertise",
        impact_score: 0.7,
        section: "overall",
        auto_apply: false,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Scores and insights
// ────────────────────────────────────────────────────────────────────────────

/// Lower-cased text of every string in the resume.
fn resume_text(resume: &ParsedResume) -> String {
    let info = &resume.personal_info;
    let optional = [
        &info.name,
        &info.email,
        &info.phone,
        &info.linkedin,
        &info.location,
        &resume.summary,
        &resume.experience_level,
    ];

    let mut parts: Vec<&str> = optional.into_iter().filter_map(Option::as_deref).collect();
    parts.extend(resume.programming_languages.iter().map(String::as_str));
    parts.extend(resume.skills.iter().map(String::as_str));
    parts.extend(resume.certifications.iter().map(String::as_str));
    for exp in &resume.experience {
        parts.extend(exp.title.as_deref());
        parts.extend(exp.company.as_deref());
        parts.push(&exp.content);
    }
    parts.extend(resume.education.iter().map(|e| e.content.as_str()));
    parts.extend(resume.projects.iter().map(|p| p.content.as_str()));

    let mut text = parts.join("\n").to_lowercase();
    if let Some(years) = resume.years_of_experience {
        text.push_str(&format!("\n{years}"));
    }
    text
}

/// Share of non-blank required skills mentioned at least once; 0 with none.
fn keyword_coverage(text: &str, required_skills: &[String]) -> f64 {
    let skills: Vec<String> = required_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        return 0.0;
    }
    let matched = skills.iter().filter(|s| text.contains(s.as_str())).count();
    matched as f64 / skills.len() as f64
}

fn overall_score(coverage: f64, alignment: f64) -> f64 {
    let score = 0.4 * coverage
        + 0.3 * BASELINE_CONTENT_SCORE
        + 0.2 * alignment
        + 0.1 * BASELINE_STRUCTURE_SCORE;
    score.min(1.0)
}

fn section_flags(resume: &ParsedResume) -> [bool; 3] {
    [
        resume.summary.as_deref().is_some_and(|s| !s.trim().is_empty()),
        !resume.experience.is_empty(),
        !resume.skills.is_empty(),
    ]
}

fn ats_score(coverage: f64, resume: &ParsedResume) -> f64 {
    let present = section_flags(resume).iter().filter(|f| **f).count();
    (0.6 * coverage + 0.4 * present as f64 / 3.0).min(1.0)
}

fn improvement_areas(
    coverage: f64,
    required_skills: &[String],
    has_digits: bool,
    alignment: f64,
) -> Vec<String> {
    let mut areas = Vec::new();
    if required_skills.iter().any(|s| !s.trim().is_empty()) && coverage < LOW_COVERAGE {
        areas.push("Keyword optimization".to_string());
    }
    if !has_digits {
        areas.push("Quantified achievements".to_string());
    }
    if alignment < LOW_INDUSTRY_ALIGNMENT {
        areas.push("Industry-specific content".to_string());
    }
    areas
}

fn strengths(resume: &ParsedResume, has_digits: bool) -> Vec<String> {
    let [has_summary, has_experience, has_skills] = section_flags(resume);
    [
        (has_summary, "Professional summary"),
        (has_experience, "Experience section"),
        (has_skills, "Skills section"),
        (has_digits, "Quantified achievements"),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, label)| label.to_string())
    .collect()
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
