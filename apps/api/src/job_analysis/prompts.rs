// Prompt constants for job description analysis.

use crate::llm_client::prompts::json_system_prompt;

pub fn job_analysis_system() -> String {
    json_system_prompt(
        "You are an expert at analyzing job descriptions and extracting structured \
         requirements data.",
    )
}

/// Requirement extraction prompt. Replace `{job_description}` before sending.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract structured information.

Return a JSON object with this EXACT schema:
{
  "required_skills": ["skill1", "skill2"],
  "preferred_skills": ["skill1", "skill2"],
  "required_experience_years": 5,
  "experience_level": "entry|mid|senior|executive",
  "technologies": ["tech1", "tech2"],
  "programming_languages": ["lang1", "lang2"],
  "frameworks": ["framework1", "framework2"],
  "databases": ["db1", "db2"],
  "cloud_platforms": ["platform1", "platform2"],
  "tools": ["tool1", "tool2"],
  "certifications": ["cert1", "cert2"],
  "education_requirements": ["requirement1"],
  "responsibilities": ["responsibility1"],
  "company_size": "startup|small|medium|large|enterprise" or null,
  "industry": "industry name" or null,
  "work_location": "remote|hybrid|onsite" or null,
  "salary_range": "salary range" or null
}

Use null for required_experience_years when the posting does not state a number.

Focus on extracting:
1. Technical skills (required vs preferred)
2. Programming languages and frameworks
3. Years of experience and seniority level
4. Education requirements
5. Key responsibilities
6. Company and role context

Job Description:
{job_description}"#;

pub fn build_job_analysis_prompt(job_description: &str) -> String {
    JOB_ANALYSIS_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_description() {
        let prompt = build_job_analysis_prompt("Rust engineer wanted");
        assert!(prompt.ends_with("Rust engineer wanted"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_system_prompt_demands_json() {
        assert!(job_analysis_system().contains("valid JSON object only"));
    }
}
