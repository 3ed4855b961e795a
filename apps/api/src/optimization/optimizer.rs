//! Industry-aware optimization of a whole resume for one job analysis.
//!
//! The professional summary is written by the first configured LLM provider
//! that answers, with a template fallback. Every other section is rewritten
//! by rules: skills are ranked by relevance and industry weight, experience
//! is split into bullets that start with an action verb, quantified
//! achievements are pulled out, and approved generated projects are merged
//! into the projects section.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::industry::profiles::DEFAULT_SKILL_WEIGHT;
use crate::industry::{
    calculate_skill_weights, detect_industry, industry_profile, IndustryProfile, IndustryType,
};
use crate::job_analysis::requirements::JobRequirements;
use crate::llm_client::{complete_json, CompletionOptions, SharedProvider};
use crate::models::resume::{ExperienceEntry, ParsedResume, PersonalInfo};
use crate::optimization::ats::{
    keyword_density, score_breakdown, ScoreBreakdown, ScoredResume, ACTION_VERBS,
};
use crate::optimization::prompts::{build_summary_prompt, summary_system};
use crate::projects::generator::GeneratedProject;
use crate::realtime::optimizer::sentences;
use crate::skills::extractor::extract_technologies_from_text;

const MAX_BULLETS: usize = 6;
const MAX_ACHIEVEMENTS: usize = 3;
const MAX_KEYWORDS_ADDED: usize = 10;
const MAX_TECHNICAL_SKILLS: usize = 8;
const MAX_TOOLS: usize = 6;
const MAX_SOFT_SKILLS: usize = 4;
const MAX_EXISTING_PROJECTS: usize = 2;
const MAX_GENERATED_PROJECTS: usize = 2;
const MAX_KEY_FEATURES: usize = 3;
const SUMMARY_SKILLS: usize = 3;
const SENIOR_YEARS: u32 = 5;

const MIN_SUMMARY_CHARS: usize = 100;
const MIN_BULLETS: usize = 3;
const MIN_TECHNICAL_SKILLS: usize = 5;

const EXACT_MATCH_SCORE: f64 = 10.0;
const PARTIAL_MATCH_SCORE: f64 = 5.0;

const TECHNICAL_MARKERS: &[&str] = &["python", "java", "javascript", "sql", "html", "css"];
const TOOL_MARKERS: &[&str] = &["git", "docker", "kubernetes", "aws", "azure"];
/// A sentence mentioning one of these already describes the candidate's own work.
const ACTION_STEMS: &[&str] = &["manage", "develop", "create", "lead"];
const FALLBACK_LEAD_VERB: &str = "utilized";

const LINKEDIN_PREFIX: &str = "https://linkedin.com/in/";

pub const PERSONAL_INFO: &str = "personal_info";
pub const PROFESSIONAL_SUMMARY: &str = "professional_summary";
pub const EXPERIENCE_SECTION: &str = "experience_section";
pub const SKILLS_SECTION: &str = "skills_section";
pub const EDUCATION_SECTION: &str = "education_section";
pub const PROJECTS_SECTION: &str = "projects_section";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

static ACHIEVEMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+%",
        r"\$\d+[KMB]?",
        r"\d+\+?\s*(?:users?|customers?|clients?)",
        r"\d+\+?\s*(?:projects?|applications?|systems?)",
        r"reduced?\s+.*?by\s+\d+%?",
        r"increased?\s+.*?by\s+\d+%?",
        r"improved?\s+.*?by\s+\d+%?",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).expect("valid achievement pattern"))
    .collect()
});

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationFocus {
    #[default]
    Ats,
    Creative,
    Executive,
    Technical,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizationRequest {
    pub target_job_title: String,
    #[serde(default)]
    pub target_company: Option<String>,
    #[serde(default)]
    pub target_industry: Option<String>,
    #[serde(default)]
    pub optimization_focus: OptimizationFocus,
    #[serde(default = "default_include_projects")]
    pub include_projects: bool,
    /// Free-form style label echoed back to the caller.
    #[serde(default = "default_format_style")]
    pub format_style: String,
}

fn default_include_projects() -> bool {
    true
}

fn default_format_style() -> String {
    "professional".to_string()
}

#[cfg(test)]
impl OptimizationRequest {
    pub fn for_title(title: &str) -> Self {
        Self {
            target_job_title: title.to_string(),
            target_company: None,
            target_industry: None,
            optimization_focus: OptimizationFocus::default(),
            include_projects: default_include_projects(),
            format_style: default_format_style(),
        }
    }
}

/// Everything one optimization run reads.
pub struct OptimizationContext<'a> {
    pub resume: &'a ParsedResume,
    pub requirements: &'a JobRequirements,
    pub job_description: &'a str,
    pub request: &'a OptimizationRequest,
    /// Approved generated projects for the same resume / job pair.
    pub approved_projects: &'a [GeneratedProject],
}

impl OptimizationContext<'_> {
    /// Detects the industry from the job description plus the target company
    /// and industry named in the request.
    pub fn industry(&self) -> (IndustryType, f64) {
        let company_info = [&self.request.target_company, &self.request.target_industry]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        detect_industry(self.job_description, &company_info)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptimizedPersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillsSection {
    pub technical_skills: Vec<String>,
    pub tools_frameworks: Vec<String>,
    pub soft_skills: Vec<String>,
    /// Every resume skill, most relevant first.
    pub all_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedExperience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Vec<String>,
    pub achievements: Vec<String>,
    /// Job keywords present in the rewrite but not in the original.
    pub keywords_added: Vec<String>,
    pub original_content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSource {
    Existing,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub key_features: Vec<String>,
    pub source: ProjectSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizedResume {
    pub personal_info: OptimizedPersonalInfo,
    pub professional_summary: String,
    pub skills_section: SkillsSection,
    pub experience_section: Vec<OptimizedExperience>,
    pub education_section: Vec<String>,
    pub projects_section: Vec<ResumeProject>,
    pub section_order: Vec<&'static str>,
    pub formatting_style: String,
    pub industry_detected: IndustryType,
    pub industry_confidence: f64,
    pub ats_score: f64,
    pub keyword_density: BTreeMap<String, usize>,
    pub optimization_notes: Vec<String>,
    pub improvements_made: Vec<String>,
}

/// ATS score of a resume as it stands, without optimizing it.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeScore {
    pub ats_score: f64,
    pub keyword_density: BTreeMap<String, usize>,
    pub score_breakdown: ScoreBreakdown,
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Optimization
// ────────────────────────────────────────────────────────────────────────────

pub async fn optimize_resume(
    ctx: &OptimizationContext<'_>,
    llm_providers: &[SharedProvider],
) -> OptimizedResume {
    let (industry, confidence) = ctx.industry();
    let profile = industry_profile(industry);
    info!(
        industry = industry.as_str(),
        confidence,
        style = profile.content_style,
        "Optimizing resume for {}",
        ctx.request.target_job_title
    );

    let summary = professional_summary(ctx, profile, llm_providers).await;
    build_optimized_resume(ctx, (industry, confidence), summary)
}

/// Assembles the optimized resume around an already written summary.
pub fn build_optimized_resume(
    ctx: &OptimizationContext<'_>,
    (industry, confidence): (IndustryType, f64),
    professional_summary: String,
) -> OptimizedResume {
    let profile = industry_profile(industry);
    let resume = ctx.resume;
    let requirements = ctx.requirements;

    let skills_section = optimize_skills(&resume.skills, requirements, industry);
    let experience_section: Vec<OptimizedExperience> = resume
        .experience
        .iter()
        .map(|entry| optimize_experience(entry, requirements, profile))
        .collect();
    let projects_section = if ctx.request.include_projects {
        merge_projects(resume, ctx.approved_projects)
    } else {
        Vec::new()
    };

    let bullets: Vec<&str> = experience_section
        .iter()
        .flat_map(|exp| exp.description.iter().map(String::as_str))
        .collect();
    let breakdown = score_breakdown(
        &ScoredResume {
            skills: &skills_section.all_skills,
            bullets: bullets.clone(),
            has_achievements: experience_section.iter().any(|exp| !exp.achievements.is_empty()),
            summary: &professional_summary,
        },
        &requirements.required_skills,
    );
    let density_text = format!(
        "{} {} {}",
        professional_summary,
        bullets.join(" "),
        skills_section.all_skills.join(" ")
    );

    let mut optimized = OptimizedResume {
        personal_info: optimize_personal_info(&resume.personal_info),
        professional_summary,
        skills_section,
        experience_section,
        education_section: resume
            .education
            .iter()
            .map(|entry| entry.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .collect(),
        projects_section,
        section_order: section_order(profile, ctx.request.optimization_focus),
        formatting_style: ctx.request.format_style.clone(),
        industry_detected: industry,
        industry_confidence: confidence,
        ats_score: breakdown.ats_score(),
        keyword_density: keyword_density(&density_text, &requirements.required_skills),
        optimization_notes: Vec::new(),
        improvements_made: Vec::new(),
    };
    optimized.optimization_notes = optimization_notes(&optimized, ctx.request.optimization_focus);
    optimized.improvements_made = improvements_made(resume, &optimized);
    optimized
}

/// Scores the resume as stored: skills list, raw experience text and summary.
pub fn score_resume(resume: &ParsedResume, requirements: &JobRequirements) -> ResumeScore {
    let summary = resume.summary.as_deref().unwrap_or_default();
    let bullets: Vec<&str> = resume.experience.iter().map(|e| e.content.as_str()).collect();
    let breakdown = score_breakdown(
        &ScoredResume {
            skills: &resume.skills,
            bullets: bullets.clone(),
            has_achievements: bullets.iter().any(|text| !extract_achievements(text).is_empty()),
            summary,
        },
        &requirements.required_skills,
    );
    let density_text = format!("{summary} {} {}", bullets.join(" "), resume.skills.join(" "));

    ResumeScore {
        ats_score: breakdown.ats_score(),
        keyword_density: keyword_density(&density_text, &requirements.required_skills),
        score_breakdown: breakdown,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn optimize_personal_info(info: &PersonalInfo) -> OptimizedPersonalInfo {
    let email_note = info
        .email
        .as_deref()
        .filter(|email| !EMAIL.is_match(email.trim()))
        .map(|_| "Consider using a professional email address".to_string());

    OptimizedPersonalInfo {
        name: info.name.clone(),
        email: info.email.clone(),
        phone: info.phone.as_deref().map(format_phone),
        linkedin: info.linkedin.as_deref().map(linkedin_url),
        location: info.location.clone(),
        email_note,
    }
}

/// Ten-digit numbers become "(555) 123-4567"; anything else is kept.
fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}

fn linkedin_url(linkedin: &str) -> String {
    let linkedin = linkedin.trim();
    if linkedin.is_empty() || linkedin.starts_with(LINKEDIN_PREFIX) {
        return linkedin.to_string();
    }
    match linkedin.trim_end_matches('/').rsplit('/').next() {
        Some(handle) if !handle.is_empty() => format!("{LINKEDIN_PREFIX}{handle}"),
        _ => linkedin.to_string(),
    }
}

async fn professional_summary(
    ctx: &OptimizationContext<'_>,
    profile: &IndustryProfile,
    llm_providers: &[SharedProvider],
) -> String {
    let configured: Vec<&SharedProvider> =
        llm_providers.iter().filter(|p| p.is_configured()).collect();

    if !configured.is_empty() {
        let system = summary_system();
        let prompt = build_summary_prompt(ctx.resume, ctx.requirements, ctx.request, profile);

        for provider in configured {
            match complete_json::<SummaryReply>(
                provider.as_ref(),
                &system,
                &prompt,
                CompletionOptions::CREATIVE,
            )
            .await
            {
                Ok(reply) if !reply.summary.trim().is_empty() => {
                    info!(provider = provider.name(), "Wrote summary with LLM");
                    return reply.summary.trim().to_string();
                }
                Ok(_) => warn!("{} returned an empty summary", provider.name()),
                Err(e) => warn!("{} summary generation failed: {e}", provider.name()),
            }
        }
    }

    template_summary(ctx.resume, ctx.requirements, ctx.request)
}

/// "Experienced Backend Engineer with 6+ years of experience in Python, Go. ..."
pub fn template_summary(
    resume: &ParsedResume,
    requirements: &JobRequirements,
    request: &OptimizationRequest,
) -> String {
    let years = resume
        .years_of_experience
        .unwrap_or(resume.experience.len() as u32);
    let lead = if years >= SENIOR_YEARS { "Experienced" } else { "Results-driven" };

    let matching: Vec<&str> = resume
        .skills
        .iter()
        .filter(|skill| {
            requirements
                .required_skills
                .iter()
                .any(|required| required.trim().eq_ignore_ascii_case(skill.trim()))
        })
        .map(String::as_str)
        .collect();
    let featured: Vec<&str> = if matching.is_empty() {
        resume.skills.iter().map(String::as_str).collect()
    } else {
        matching
    };
    let featured: Vec<&str> = featured
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .take(SUMMARY_SKILLS)
        .collect();

    let mut summary = format!(
        "{lead} {} with {years}+ years of experience",
        request.target_job_title.trim()
    );
    if featured.is_empty() {
        summary.push_str(". ");
    } else {
        summary.push_str(&format!(" in {}. ", featured.join(", ")));
    }
    summary.push_str("Proven track record of delivering high-quality solutions and driving business results. ");
    summary.push_str(&format!(
        "Seeking to leverage expertise in {} to contribute to {}.",
        request.target_industry.as_deref().unwrap_or("technology"),
        request
            .target_company
            .as_deref()
            .unwrap_or("a dynamic organization")
    ));
    summary
}

/// Splits skills into technical, tools and soft groups and ranks every list by
/// relevance to the job.
fn optimize_skills(
    skills: &[String],
    requirements: &JobRequirements,
    industry: IndustryType,
) -> SkillsSection {
    let skills: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let targets: Vec<String> = requirements
        .required_skills
        .iter()
        .chain(&requirements.preferred_skills)
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut technical = Vec::new();
    let mut tools = Vec::new();
    let mut soft = Vec::new();
    for skill in &skills {
        let lower = skill.to_lowercase();
        if TECHNICAL_MARKERS.iter().any(|m| lower.contains(m)) {
            technical.push(skill.clone());
        } else if TOOL_MARKERS.iter().any(|m| lower.contains(m)) {
            tools.push(skill.clone());
        } else {
            soft.push(skill.clone());
        }
    }

    let mut technical = prioritize_skills(technical, &targets, industry);
    technical.truncate(MAX_TECHNICAL_SKILLS);
    let mut tools = prioritize_skills(tools, &targets, industry);
    tools.truncate(MAX_TOOLS);
    soft.truncate(MAX_SOFT_SKILLS);

    SkillsSection {
        technical_skills: technical,
        tools_frameworks: tools,
        soft_skills: soft,
        all_skills: prioritize_skills(skills, &targets, industry),
    }
}

/// Highest relevance first, then alphabetical. Relevance is 10 per exact and
/// 5 per partial target match, scaled by the skill's industry weight.
fn prioritize_skills(skills: Vec<String>, targets: &[String], industry: IndustryType) -> Vec<String> {
    let weights = calculate_skill_weights(&skills[..], industry);
    let mut scored: Vec<(f64, String)> = skills
        .into_iter()
        .map(|skill| {
            let lower = skill.to_lowercase();
            let matches: f64 = targets
                .iter()
                .map(|target| {
                    if lower == *target {
                        EXACT_MATCH_SCORE
                    } else if lower.contains(target.as_str()) || target.contains(&lower) {
                        PARTIAL_MATCH_SCORE
                    } else {
                        0.0
                    }
                })
                .sum();
            let weight = weights.get(&skill).copied().unwrap_or(DEFAULT_SKILL_WEIGHT);
            (matches * weight, skill)
        })
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| b_score.total_cmp(a_score).then_with(|| a.cmp(b)));
    scored.into_iter().map(|(_, skill)| skill).collect()
}

fn optimize_experience(
    entry: &ExperienceEntry,
    requirements: &JobRequirements,
    profile: &IndustryProfile,
) -> OptimizedExperience {
    let description = rewrite_bullets(&entry.content, &requirements.required_skills, profile);
    let keywords_added = added_keywords(&entry.content, &description, requirements);

    OptimizedExperience {
        title: entry.title.clone(),
        company: entry.company.clone(),
        achievements: extract_achievements(&entry.content),
        description,
        keywords_added,
        original_content: entry.content.clone(),
    }
}

/// One bullet per sentence, at most six. A sentence that opens with an action
/// verb, or already describes managing, developing, creating or leading, is
/// kept. Otherwise it is prefixed with the industry's lead verb when it names
/// a required skill, and with "Contributed to" when it does not.
pub fn rewrite_bullets(
    content: &str,
    required_skills: &[String],
    profile: &IndustryProfile,
) -> Vec<String> {
    let lead_verb = capitalize(
        profile
            .preferred_action_verbs
            .first()
            .copied()
            .unwrap_or(FALLBACK_LEAD_VERB),
    );
    let required: Vec<String> = required_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    sentences(content)
        .take(MAX_BULLETS)
        .map(|sentence| {
            let sentence = sentence.trim_end_matches('.');
            let first = sentence
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase();
            let opens_with_verb = profile
                .preferred_action_verbs
                .iter()
                .chain(ACTION_VERBS)
                .any(|verb| *verb == first);
            let lower = sentence.to_lowercase();

            if opens_with_verb || ACTION_STEMS.iter().any(|stem| lower.contains(stem)) {
                sentence.to_string()
            } else if required.iter().any(|skill| lower.contains(skill.as_str())) {
                format!("{lead_verb} {}", lowercase_first(sentence))
            } else {
                format!("Contributed to {}", lowercase_first(sentence))
            }
        })
        .collect()
}

/// Up to three quantified achievements: percentages, dollar amounts, user
/// and project counts, then "reduced / increased / improved ... by N" phrases.
pub fn extract_achievements(content: &str) -> Vec<String> {
    ACHIEVEMENT_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(content).map(|m| m.as_str().to_string()))
        .take(MAX_ACHIEVEMENTS)
        .collect()
}

fn added_keywords(original: &str, bullets: &[String], requirements: &JobRequirements) -> Vec<String> {
    let original = original.to_lowercase();
    let rewritten = bullets.join(" ").to_lowercase();

    let mut added: Vec<String> = Vec::new();
    for keyword in requirements
        .required_skills
        .iter()
        .chain(&requirements.preferred_skills)
        .chain(&requirements.technologies)
        .chain(&requirements.tools)
    {
        let lower = keyword.trim().to_lowercase();
        if lower.is_empty() || added.iter().any(|k| k.eq_ignore_ascii_case(keyword.trim())) {
            continue;
        }
        if rewritten.contains(&lower) && !original.contains(&lower) {
            added.push(keyword.trim().to_string());
        }
    }
    added.truncate(MAX_KEYWORDS_ADDED);
    added
}

fn merge_projects(resume: &ParsedResume, approved: &[GeneratedProject]) -> Vec<ResumeProject> {
    let existing = resume
        .projects
        .iter()
        .filter(|entry| !entry.content.trim().is_empty())
        .take(MAX_EXISTING_PROJECTS)
        .map(|entry| {
            let content = entry.content.trim();
            ResumeProject {
                name: content.lines().next().unwrap_or_default().trim().to_string(),
                description: content.to_string(),
                technologies: extract_technologies_from_text(content),
                key_features: Vec::new(),
                source: ProjectSource::Existing,
            }
        });

    let generated = approved.iter().take(MAX_GENERATED_PROJECTS).map(|project| ResumeProject {
        name: project.title.clone(),
        description: project.description.clone(),
        technologies: project.technologies_used.clone(),
        key_features: project
            .deliverables
            .iter()
            .take(MAX_KEY_FEATURES)
            .cloned()
            .collect(),
        source: ProjectSource::Generated,
    });

    existing.chain(generated).collect()
}

fn section_for_priority(priority: &str) -> Option<&'static str> {
    match priority {
        "technical_skills" | "skills" => Some(SKILLS_SECTION),
        "experience" | "achievements" => Some(EXPERIENCE_SECTION),
        "projects" => Some(PROJECTS_SECTION),
        "certifications" | "education" => Some(EDUCATION_SECTION),
        _ => None,
    }
}

/// Personal info and summary first, then the industry's section priorities.
/// Without priorities the order follows the optimization focus.
pub fn section_order(profile: &IndustryProfile, focus: OptimizationFocus) -> Vec<&'static str> {
    let mut order = vec![PERSONAL_INFO, PROFESSIONAL_SUMMARY];

    if profile.section_priorities.is_empty() {
        order.extend(match focus {
            OptimizationFocus::Technical => {
                &[SKILLS_SECTION, PROJECTS_SECTION, EXPERIENCE_SECTION, EDUCATION_SECTION][..]
            }
            OptimizationFocus::Executive => &[EXPERIENCE_SECTION, EDUCATION_SECTION, SKILLS_SECTION][..],
            OptimizationFocus::Ats | OptimizationFocus::Creative => {
                &[EXPERIENCE_SECTION, SKILLS_SECTION, EDUCATION_SECTION, PROJECTS_SECTION][..]
            }
        });
        return order;
    }

    let prioritized = profile
        .section_priorities
        .iter()
        .filter_map(|priority| section_for_priority(priority));
    let remaining = [EXPERIENCE_SECTION, SKILLS_SECTION, EDUCATION_SECTION, PROJECTS_SECTION];
    for section in prioritized.chain(remaining) {
        if !order.contains(&section) {
            order.push(section);
        }
    }
    order
}

fn optimization_notes(optimized: &OptimizedResume, focus: OptimizationFocus) -> Vec<String> {
    let mut notes = Vec::new();

    if optimized.professional_summary.chars().count() < MIN_SUMMARY_CHARS {
        notes.push("Consider expanding professional summary to 3-4 sentences".to_string());
    }
    for exp in &optimized.experience_section {
        if exp.description.len() < MIN_BULLETS {
            notes.push(format!(
                "Add more bullet points for {}",
                exp.title.as_deref().unwrap_or("position")
            ));
        }
    }
    if optimized.skills_section.technical_skills.len() < MIN_TECHNICAL_SKILLS {
        notes.push("Consider adding more technical skills relevant to the role".to_string());
    }
    if focus == OptimizationFocus::Ats {
        notes.push("Resume optimized for ATS systems - avoid fancy formatting when submitting".to_string());
        notes.push("Submit as a PDF with selectable text".to_string());
    }
    notes
}

fn improvements_made(original: &ParsedResume, optimized: &OptimizedResume) -> Vec<String> {
    let mut improvements = Vec::new();

    let original_summary = original.summary.as_deref().map(str::trim).unwrap_or_default();
    if original_summary.is_empty() {
        improvements.push("Generated professional summary tailored to job requirements".to_string());
    } else if original_summary != optimized.professional_summary {
        improvements.push("Enhanced professional summary with job-relevant keywords".to_string());
    }

    let original_skills: Vec<&str> = original
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if original_skills != optimized.skills_section.all_skills {
        improvements.push("Reorganized skills section by relevance to job requirements".to_string());
    }

    let rewritten = optimized
        .experience_section
        .iter()
        .filter(|exp| {
            let plain: Vec<&str> = sentences(&exp.original_content)
                .take(MAX_BULLETS)
                .map(|s| s.trim_end_matches('.'))
                .collect();
            plain != exp.description
        })
        .count();
    if rewritten > 0 {
        improvements.push(format!(
            "Rewrote {rewritten} experience sections with stronger action verbs and impact focus"
        ));
    }

    let keywords_added: usize = optimized
        .experience_section
        .iter()
        .map(|exp| exp.keywords_added.len())
        .sum();
    if keywords_added > 0 {
        improvements.push(format!(
            "Added {keywords_added} job-relevant keywords throughout experience descriptions"
        ));
    }

    let achievements: usize = optimized
        .experience_section
        .iter()
        .map(|exp| exp.achievements.len())
        .sum();
    if achievements > 0 {
        improvements.push(format!(
            "Identified and highlighted {achievements} quantifiable achievements"
        ));
    }

    if !optimized.projects_section.is_empty() {
        improvements.push(format!(
            "Integrated {} relevant projects to demonstrate missing skills",
            optimized.projects_section.len()
        ));
    }

    improvements.push("Optimized content for ATS compatibility and keyword density".to_string());
    improvements.push("Reordered resume sections for maximum impact".to_string());
    improvements
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::FakeProvider;
    use crate::projects::generator::{generate_template_project, ProjectGenerationRequest};
    use serde_json::json;

    fn resume() -> ParsedResume {
        serde_json::from_value(json!({
            "personal_info": {
                "name": "Ada",
                "email": "ada@example.com",
                "phone": "555.123.4567",
                "linkedin": "linkedin.com/in/ada/"
            },
            "skills": ["Teamwork", "Docker", "Python", "SQL"],
            "experience": [{
                "title": "Engineer",
                "company": "Acme",
                "content": "Developed billing APIs. Python services for reporting. On-call rotation for Node.js systems. Reduced latency by 40%"
            }],
            "education": [{"content": "BSc Computer Science"}],
            "projects": [{"content": "Ledger\nA React dashboard backed by PostgreSQL"}]
        }))
        .unwrap()
    }

    fn requirements() -> JobRequirements {
        JobRequirements {
            required_skills: vec!["Python".into(), "SQL".into()],
            preferred_skills: vec!["Docker".into()],
            technologies: vec!["AWS".into()],
            ..Default::default()
        }
    }

    fn context<'a>(
        resume: &'a ParsedResume,
        requirements: &'a JobRequirements,
        request: &'a OptimizationRequest,
        approved: &'a [GeneratedProject],
    ) -> OptimizationContext<'a> {
        OptimizationContext {
            resume,
            requirements,
            job_description: "Backend software development with python and cloud computing on aws",
            request,
            approved_projects: approved,
        }
    }

    #[test]
    fn test_personal_info_is_normalized() {
        let info = optimize_personal_info(&resume().personal_info);
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(info.linkedin.as_deref(), Some("https://linkedin.com/in/ada"));
        assert!(info.email_note.is_none());

        let odd = optimize_personal_info(&PersonalInfo {
            email: Some("not-an-email".into()),
            phone: Some("+44 20 7946 0958".into()),
            ..Default::default()
        });
        assert!(odd.email_note.is_some());
        assert_eq!(odd.phone.as_deref(), Some("+44 20 7946 0958"));
    }

    #[test]
    fn test_bullets_gain_action_verbs() {
        let profile = industry_profile(IndustryType::Technology);
        let bullets = rewrite_bullets(
            "Developed billing APIs. Python services for reporting. On-call rotation for Node.js systems.",
            &["Python".to_string()],
            profile,
        );
        assert_eq!(
            bullets,
            vec![
                "Developed billing APIs",
                "Developed python services for reporting",
                "Contributed to on-call rotation for Node.js systems",
            ]
        );
    }

    #[test]
    fn test_bullets_are_capped_at_six() {
        let content = "One. Two. Three. Four. Five. Six. Seven. Eight";
        let bullets = rewrite_bullets(content, &[], industry_profile(IndustryType::General));
        assert_eq!(bullets.len(), MAX_BULLETS);
    }

    #[test]
    fn test_achievements_keep_whole_matches() {
        let achievements = extract_achievements(
            "Grew revenue 25% for 300 customers. Increased throughput by 3x. Saved $40K",
        );
        assert_eq!(achievements, vec!["25%", "$40K", "300 customers"]);
        assert!(extract_achievements("Maintained services").is_empty());
    }

    #[test]
    fn test_skills_are_grouped_and_ranked() {
        let section = optimize_skills(
            &["Teamwork".into(), "Docker".into(), "Python".into(), "SQL".into(), " ".into()],
            &requirements(),
            IndustryType::Technology,
        );
        assert_eq!(section.technical_skills, vec!["Python", "SQL"]);
        assert_eq!(section.tools_frameworks, vec!["Docker"]);
        assert_eq!(section.soft_skills, vec!["Teamwork"]);
        assert_eq!(section.all_skills, vec!["Docker", "Python", "SQL", "Teamwork"]);
    }

    #[test]
    fn test_template_summary() {
        let mut resume = resume();
        resume.years_of_experience = Some(6);
        let mut request = OptimizationRequest::for_title("Backend Engineer");
        request.target_company = Some("Initech".into());

        let summary = template_summary(&resume, &requirements(), &request);
        assert!(summary.starts_with(
            "Experienced Backend Engineer with 6+ years of experience in Python, SQL. "
        ));
        assert!(summary.ends_with("expertise in technology to contribute to Initech."));

        let empty = template_summary(&ParsedResume::default(), &requirements(), &request);
        assert!(empty.starts_with("Results-driven Backend Engineer with 0+ years of experience. "));
    }

    #[test]
    fn test_section_order_follows_industry_priorities() {
        let order = section_order(
            industry_profile(IndustryType::Technology),
            OptimizationFocus::Ats,
        );
        assert_eq!(
            order,
            vec![
                PERSONAL_INFO,
                PROFESSIONAL_SUMMARY,
                SKILLS_SECTION,
                EXPERIENCE_SECTION,
                PROJECTS_SECTION,
                EDUCATION_SECTION,
            ]
        );
    }

    #[test]
    fn test_built_resume_merges_projects_and_reports() {
        let resume = resume();
        let requirements = requirements();
        let request = OptimizationRequest::for_title("Backend Engineer");
        let approved = vec![generate_template_project(&ProjectGenerationRequest {
            target_skills: vec!["React".into()],
            ..Default::default()
        })];
        let ctx = context(&resume, &requirements, &request, &approved);

        let optimized = build_optimized_resume(&ctx, ctx.industry(), "Short summary".to_string());

        assert_eq!(optimized.industry_detected, IndustryType::Technology);
        assert_eq!(optimized.education_section, vec!["BSc Computer Science"]);
        assert_eq!(optimized.projects_section.len(), 2);
        assert_eq!(optimized.projects_section[0].name, "Ledger");
        assert_eq!(optimized.projects_section[0].source, ProjectSource::Existing);
        assert_eq!(optimized.projects_section[1].name, approved[0].title);
        assert_eq!(optimized.projects_section[1].source, ProjectSource::Generated);
        assert_eq!(optimized.experience_section[0].achievements, vec!["40%", "Reduced latency by 40%"]);
        assert_eq!(optimized.keyword_density.get("Python"), Some(&2));
        assert!(optimized
            .optimization_notes
            .contains(&"Consider expanding professional summary to 3-4 sentences".to_string()));
        assert!(optimized
            .improvements_made
            .contains(&"Generated professional summary tailored to job requirements".to_string()));
        assert!(optimized
            .improvements_made
            .contains(&"Integrated 2 relevant projects to demonstrate missing skills".to_string()));
        assert!(optimized.ats_score > 0.5);
    }

    #[test]
    fn test_projects_can_be_left_out() {
        let resume = resume();
        let requirements = requirements();
        let mut request = OptimizationRequest::for_title("Engineer");
        request.include_projects = false;
        let ctx = context(&resume, &requirements, &request, &[]);

        let optimized = build_optimized_resume(&ctx, (IndustryType::General, 0.5), String::new());
        assert!(optimized.projects_section.is_empty());
    }

    #[test]
    fn test_score_resume_as_stored() {
        let score = score_resume(&resume(), &requirements());
        assert_eq!(score.score_breakdown.keyword_matching, 40.0);
        assert_eq!(score.score_breakdown.quantified_achievements, 20.0);
        assert_eq!(score.score_breakdown.structure, 0.0);
        assert_eq!(score.ats_score, score.score_breakdown.ats_score());
    }

    #[tokio::test]
    async fn test_summary_comes_from_first_answering_provider() {
        let resume = resume();
        let requirements = requirements();
        let request = OptimizationRequest::for_title("Backend Engineer");
        let ctx = context(&resume, &requirements, &request, &[]);
        let providers = vec![
            FakeProvider::failing("openai", 500),
            FakeProvider::text("gemini", r#"{"summary": "  Seasoned engineer.  "}"#),
        ];

        let optimized = optimize_resume(&ctx, &providers).await;
        assert_eq!(optimized.professional_summary, "Seasoned engineer.");
    }

    #[tokio::test]
    async fn test_summary_falls_back_to_template() {
        let resume = resume();
        let requirements = requirements();
        let request = OptimizationRequest::for_title("Backend Engineer");
        let ctx = context(&resume, &requirements, &request, &[]);
        let providers = vec![
            FakeProvider::unconfigured("openai"),
            FakeProvider::text("gemini", r#"{"summary": " "}"#),
        ];

        let optimized = optimize_resume(&ctx, &providers).await;
        assert_eq!(
            optimized.professional_summary,
            template_summary(&resume, &requirements, &request)
        );
    }
}
