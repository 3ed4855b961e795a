// Prompt constants for professional summary rewriting.

use crate::industry::IndustryProfile;
use crate::job_analysis::requirements::JobRequirements;
use crate::llm_client::prompts::json_system_prompt;
use crate::models::resume::ParsedResume;
use crate::optimization::optimizer::OptimizationRequest;

const PROMPT_EXPERIENCE_ENTRIES: usize = 3;
const PROMPT_SKILLS: usize = 10;

pub fn summary_system() -> String {
    json_system_prompt(
        "You are an expert resume writer who creates compelling professional summaries \
         that are both ATS-friendly and engaging to hiring managers.",
    )
}

pub fn build_summary_prompt(
    resume: &ParsedResume,
    requirements: &JobRequirements,
    request: &OptimizationRequest,
    profile: &IndustryProfile,
) -> String {
    let industry = profile.industry.as_str();
    let experience = resume
        .experience
        .iter()
        .take(PROMPT_EXPERIENCE_ENTRIES)
        .map(|entry| {
            format!(
                "- {} at {}: {}",
                entry.title.as_deref().unwrap_or("Role"),
                entry.company.as_deref().unwrap_or("N/A"),
                entry.content.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let skills: Vec<&str> = resume
        .skills
        .iter()
        .take(PROMPT_SKILLS)
        .map(String::as_str)
        .collect();
    let focus = profile.achievement_focus;

    format!(
        r#"Create a professional summary for a resume targeting this role:

TARGET ROLE: {title}
COMPANY: {company}
INDUSTRY: {industry} ({target_industry})

INDUSTRY CONTEXT:
- Content Style: {style}
- Key Focus Areas: {focus_areas}
- Preferred Action Verbs: {verbs}
- Important Metrics: {metrics}

CANDIDATE EXPERIENCE:
{experience}

CANDIDATE SKILLS: {skills}

JOB REQUIREMENTS:
Required Skills: {required}
Experience Level: {level}

Write a compelling 3-4 sentence professional summary that:
1. Highlights relevant experience and achievements in language suited to the {industry} industry
2. Uses the job's keywords naturally
3. States the candidate's value for the target role
4. Emphasizes {key_strengths} as key strengths

Return a JSON object with this EXACT schema:
{{"summary": "The professional summary"}}"#,
        title = request.target_job_title,
        company = request.target_company.as_deref().unwrap_or("N/A"),
        target_industry = request.target_industry.as_deref().unwrap_or("N/A"),
        style = profile.content_style,
        focus_areas = focus.iter().take(5).copied().collect::<Vec<_>>().join(", "),
        verbs = profile
            .preferred_action_verbs
            .iter()
            .take(8)
            .copied()
            .collect::<Vec<_>>()
            .join(", "),
        metrics = profile.metric_types.iter().take(5).copied().collect::<Vec<_>>().join(", "),
        skills = skills.join(", "),
        required = requirements.required_skills.join(", "),
        level = requirements.experience_level,
        key_strengths = focus.iter().take(3).copied().collect::<Vec<_>>().join(", "),
    )
}
