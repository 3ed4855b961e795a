// Prompt constants for learning-project generation.

use crate::gap_analysis::GapAnalysisResult;
use crate::llm_client::prompts::json_system_prompt;
use crate::projects::generator::ProjectGenerationRequest;

pub fn project_generation_system() -> String {
    json_system_prompt(
        "You are an expert project manager and career advisor who creates realistic, \
         valuable projects for skill development.",
    )
}

pub fn build_project_prompt(gap: &GapAnalysisResult, request: &ProjectGenerationRequest) -> String {
    let weeks = request.time_commitment_weeks;
    let level = &request.experience_level;

    format!(
        r#"Generate a realistic, industry-relevant project that will help fill these skill gaps:

MISSING SKILLS: {skills}
MISSING TECHNOLOGIES: {technologies}
EXPERIENCE LEVEL: {level}
INDUSTRY: {industry}
TIME COMMITMENT: {weeks} weeks
PROJECT TYPE: {project_type}

CURRENT SKILLS: {current}

Generate a project that:
1. Teaches the missing skills effectively
2. Uses the missing technologies
3. Is appropriate for {level} level
4. Can be completed in {weeks} weeks
5. Results in a portfolio-worthy deliverable

Return a JSON object with this EXACT schema:
{{
  "title": "Project title",
  "description": "Detailed project description (2-3 sentences)",
  "duration_weeks": {weeks},
  "difficulty_level": "{level}",
  "target_skills": ["skill1", "skill2"],
  "technologies_used": ["tech1", "tech2"],
  "frameworks": ["framework1"],
  "databases": ["db1"],
  "project_phases": [
    {{
      "phase_number": 1,
      "name": "Phase name",
      "description": "What to do in this phase",
      "estimated_hours": 20,
      "tasks": ["task1", "task2"],
      "skills_practiced": ["skill1"],
      "deliverables": ["deliverable1"]
    }}
  ],
  "deliverables": ["final deliverable1"],
  "learning_objectives": ["objective1"],
  "relevance_score": 0.9,
  "feasibility_score": 0.8,
  "impact_score": 0.85
}}

Make the project realistic, practical, and valuable for a resume."#,
        skills = request.target_skills.join(", "),
        technologies = request.missing_technologies.join(", "),
        industry = request.industry.as_deref().unwrap_or("General"),
        project_type = request.project_type.as_deref().unwrap_or("Any"),
        current = gap.matching_skills.join(", "),
    )
}
