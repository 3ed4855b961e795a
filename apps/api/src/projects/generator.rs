//! Learning-project generator.
//!
//! Configured LLM providers are tried in order; the first one that returns a
//! parseable project wins. With no configured provider, or when all fail, the
//! project is built from the category template matching the target skills.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::gap_analysis::GapAnalysisResult;
use crate::llm_client::{complete_json, CompletionOptions, SharedProvider};
use crate::projects::prompts::{build_project_prompt, project_generation_system};
use crate::projects::templates::{determine_project_category, select_template, PhaseTemplate};

pub const HOURS_PER_WEEK: u32 = 20;
pub const DEFAULT_TIME_COMMITMENT_WEEKS: u32 = 4;
pub const DEFAULT_PROJECT_LEVEL: &str = "mid";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectGenerationRequest {
    pub target_skills: Vec<String>,
    pub missing_technologies: Vec<String>,
    pub experience_level: String,
    pub industry: Option<String>,
    pub time_commitment_weeks: u32,
    /// e.g. "web", "mobile", "data"
    pub project_type: Option<String>,
}

impl Default for ProjectGenerationRequest {
    fn default() -> Self {
        Self {
            target_skills: Vec::new(),
            missing_technologies: Vec::new(),
            experience_level: DEFAULT_PROJECT_LEVEL.to_string(),
            industry: None,
            time_commitment_weeks: DEFAULT_TIME_COMMITMENT_WEEKS,
            project_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    Ai,
    #[default]
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPhase {
    #[serde(default)]
    pub phase_number: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub skills_practiced: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
}

/// A generated project. LLM output deserializes straight into this type; the
/// generation metadata is filled in afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProject {
    pub title: String,
    pub description: String,
    pub duration_weeks: u32,
    pub difficulty_level: String,

    pub target_skills: Vec<String>,
    pub technologies_used: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub databases: Vec<String>,

    pub project_phases: Vec<ProjectPhase>,
    pub deliverables: Vec<String>,
    pub learning_objectives: Vec<String>,

    pub relevance_score: f64,
    pub feasibility_score: f64,
    pub impact_score: f64,

    #[serde(default)]
    pub generation_method: GenerationMethod,
    #[serde(default)]
    pub ai_model_used: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
}

pub async fn generate_project(
    gap: &GapAnalysisResult,
    request: &ProjectGenerationRequest,
    llm_providers: &[SharedProvider],
) -> GeneratedProject {
    let configured: Vec<&SharedProvider> =
        llm_providers.iter().filter(|p| p.is_configured()).collect();

    if !configured.is_empty() {
        let system = project_generation_system();
        let prompt = build_project_prompt(gap, request);

        for provider in configured {
            match complete_json::<GeneratedProject>(
                provider.as_ref(),
                &system,
                &prompt,
                CompletionOptions::CREATIVE,
            )
            .await
            {
                Ok(mut project) => {
                    project.generation_method = GenerationMethod::Ai;
                    project.ai_model_used = Some(provider.model().to_string());
                    project.template_id = None;
                    info!(provider = provider.name(), "Generated project with LLM");
                    return project;
                }
                Err(e) => warn!("{} project generation failed: {e}", provider.name()),
            }
        }
    }

    generate_template_project(request)
}

/// Builds a project from the template of the category the target skills point to.
pub fn generate_template_project(request: &ProjectGenerationRequest) -> GeneratedProject {
    let category = determine_project_category(&request.target_skills);
    let template = select_template(category);
    info!(category = category.as_str(), template = template.id, "Using template project");

    // without missing technologies the title names the target skills instead
    let named = if request.missing_technologies.is_empty() {
        &request.target_skills
    } else {
        &request.missing_technologies
    };
    let title = fill_title(template.title, named);

    GeneratedProject {
        title,
        description: template.description.to_string(),
        duration_weeks: request.time_commitment_weeks,
        difficulty_level: request.experience_level.clone(),
        target_skills: request.target_skills.clone(),
        technologies_used: request.missing_technologies.clone(),
        frameworks: Vec::new(),
        databases: Vec::new(),
        project_phases: build_phases(template.phases),
        deliverables: vec![
            "Complete project repository with documentation".to_string(),
            "Deployed application with live demo".to_string(),
            "Technical presentation of solution".to_string(),
        ],
        learning_objectives: request
            .target_skills
            .iter()
            .take(3)
            .map(|skill| format!("Master {skill}"))
            .collect(),
        relevance_score: 0.8,
        feasibility_score: 0.9,
        impact_score: 0.7,
        generation_method: GenerationMethod::Template,
        ai_model_used: None,
        template_id: Some(template.id.to_string()),
    }
}

/// Substitutes up to three names for `{technologies}`, dropping the
/// " with {technologies}" clause when there are none.
fn fill_title(template: &str, names: &[String]) -> String {
    let names: Vec<&str> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .take(3)
        .collect();

    let filled = if names.is_empty() {
        template
            .replace(" with {technologies}", "")
            .replace("{technologies}", "")
    } else {
        template.replace("{technologies}", &names.join(", "))
    };
    filled.trim().to_string()
}

/// Expands template phases, budgeting [`HOURS_PER_WEEK`] per week.
pub fn build_phases(phases: &[PhaseTemplate]) -> Vec<ProjectPhase> {
    phases
        .iter()
        .zip(1..)
        .map(|(phase, phase_number)| ProjectPhase {
            phase_number,
            name: phase.name.to_string(),
            description: format!(
                "Complete {} including all required functionality",
                phase.name.to_lowercase()
            ),
            estimated_hours: phase.duration_weeks * HOURS_PER_WEEK,
            tasks: [
                "Planning and research",
                "Implementation",
                "Testing and refinement",
                "Documentation",
            ]
            .map(String::from)
            .to_vec(),
            skills_practiced: phase.skills.iter().map(|s| s.to_string()).collect(),
            deliverables: vec![
                format!("{} completed", phase.name),
                "Documentation updated".to_string(),
                "Code reviewed and tested".to_string(),
            ],
        })
        .collect()
}

/// Quality issues with a generated project. Empty means the project is usable.
pub fn validate_project(project: &GeneratedProject) -> Vec<String> {
    let mut issues = Vec::new();

    if project.title.chars().count() < 10 {
        issues.push("Title too short or missing".to_string());
    }
    if project.description.chars().count() < 50 {
        issues.push("Description too short or missing".to_string());
    }
    if project.target_skills.is_empty() {
        issues.push("No target skills specified".to_string());
    }
    if project.project_phases.is_empty() {
        issues.push("No project phases defined".to_string());
    }
    if !(1..=12).contains(&project.duration_weeks) {
        issues.push("Duration should be 1-12 weeks".to_string());
    }

    for (name, score) in [
        ("relevance", project.relevance_score),
        ("feasibility", project.feasibility_score),
        ("impact", project.impact_score),
    ] {
        if !(0.0..=1.0).contains(&score) {
            issues.push(format!("Invalid {name} score"));
        }
    }

    issues
}
