//! Axum route handlers for the Project Generation API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as DbJson;
use tracing::info;

use crate::errors::AppError;
use crate::gap_analysis::analyzer::GapAnalysisResult;
use crate::gap_analysis::analyze_gap;
use crate::gap_analysis::handlers::fetch_resume;
use crate::job_analysis::handlers::{fetch_job_analysis, UserIdQuery};
use crate::job_analysis::requirements::JobRequirements;
use crate::models::project::ProjectRow;
use crate::projects::generator::{
    generate_project, validate_project, GeneratedProject, ProjectGenerationRequest,
    DEFAULT_TIME_COMMITMENT_WEEKS,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GenerateProjectRequest {
    pub user_id: i64,
    pub resume_id: i64,
    pub job_analysis_id: i64,
    /// Defaults to the gap analysis' missing required skills.
    pub target_skills: Option<Vec<String>>,
    /// Defaults to the gap analysis' missing technologies.
    pub missing_technologies: Option<Vec<String>>,
    /// Defaults to the job's experience level.
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    pub time_commitment_weeks: Option<u32>,
    pub project_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub user_id: i64,
    pub resume_id: Option<i64>,
    pub job_analysis_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub resume_id: i64,
    pub job_analysis_id: i64,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub project: GeneratedProject,
    pub is_valid: bool,
    pub validation_issues: Vec<String>,
}

impl From<ProjectRow> for ProjectResponse {
    fn from(row: ProjectRow) -> Self {
        let validation_issues = validate_project(&row.project.0);
        Self {
            id: row.id,
            resume_id: row.resume_id,
            job_analysis_id: row.job_analysis_id,
            is_approved: row.is_approved,
            created_at: row.created_at,
            project: row.project.0,
            is_valid: validation_issues.is_empty(),
            validation_issues,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/projects/generate
///
/// Runs a gap analysis for the pair, generates a project aimed at the gaps and
/// stores it unapproved.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let row = generate_and_store(&state, &request).await?;
    Ok(Json(row.into()))
}

/// GET /api/v1/projects?user_id=&resume_id=&job_analysis_id=
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let rows: Vec<ProjectRow> = sqlx::query_as(
        r#"
        SELECT * FROM generated_projects
        WHERE user_id = $1
          AND ($2::BIGINT IS NULL OR resume_id = $2)
          AND ($3::BIGINT IS NULL OR job_analysis_id = $3)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.user_id)
    .bind(params.resume_id)
    .bind(params.job_analysis_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/projects/:id?user_id=
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProjectResponse>, AppError> {
    let row = fetch_project(&state, id, params.user_id).await?;
    Ok(Json(row.into()))
}

/// POST /api/v1/projects/:id/approve?user_id=
///
/// Approved projects are the ones the resume optimizer adds to a resume.
pub async fn handle_approve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProjectResponse>, AppError> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "UPDATE generated_projects SET is_approved = TRUE WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(params.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    info!(project_id = id, "Project approved");
    Ok(Json(row.into()))
}

/// DELETE /api/v1/projects/:id?user_id=
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM generated_projects WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Project {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/:id/regenerate?user_id=
///
/// Generates a fresh project for the same pair and replaces the old one.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProjectResponse>, AppError> {
    let old = fetch_project(&state, id, params.user_id).await?;

    let request = GenerateProjectRequest {
        user_id: old.user_id,
        resume_id: old.resume_id,
        job_analysis_id: old.job_analysis_id,
        time_commitment_weeks: Some(old.project.0.duration_weeks),
        ..Default::default()
    };
    let row = generate_and_store(&state, &request).await?;

    sqlx::query("DELETE FROM generated_projects WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    info!(old_id = id, new_id = row.id, "Project regenerated");
    Ok(Json(row.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn generate_and_store(
    state: &AppState,
    request: &GenerateProjectRequest,
) -> Result<ProjectRow, AppError> {
    let resume = fetch_resume(state, request.resume_id, request.user_id).await?;
    let job = fetch_job_analysis(state, request.job_analysis_id, request.user_id).await?;

    let requirements = job.requirements();
    let gap = analyze_gap(&resume.parsed(), &requirements);
    let generation_request = generation_request(request, &gap, &requirements);

    if generation_request.target_skills.is_empty() {
        return Err(AppError::Validation(
            "No target skills given and the gap analysis found no missing required skills"
                .to_string(),
        ));
    }

    let project = generate_project(&gap, &generation_request, &state.llm_providers).await;

    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO generated_projects (user_id, resume_id, job_analysis_id, project)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(request.user_id)
    .bind(request.resume_id)
    .bind(request.job_analysis_id)
    .bind(DbJson(&project))
    .fetch_one(&state.db)
    .await?;

    info!(
        project_id = row.id,
        resume_id = row.resume_id,
        job_analysis_id = row.job_analysis_id,
        "Project generated"
    );
    Ok(row)
}

/// Fills every field the caller left out from the gap analysis and the job.
pub fn generation_request(
    request: &GenerateProjectRequest,
    gap: &GapAnalysisResult,
    requirements: &JobRequirements,
) -> ProjectGenerationRequest {
    ProjectGenerationRequest {
        target_skills: request
            .target_skills
            .clone()
            .unwrap_or_else(|| gap.missing_required_skills.clone()),
        missing_technologies: request
            .missing_technologies
            .clone()
            .unwrap_or_else(|| gap.missing_technologies.clone()),
        experience_level: request
            .experience_level
            .clone()
            .unwrap_or_else(|| requirements.experience_level.clone()),
        industry: request
            .industry
            .clone()
            .or_else(|| requirements.industry.clone()),
        time_commitment_weeks: request
            .time_commitment_weeks
            .unwrap_or(DEFAULT_TIME_COMMITMENT_WEEKS),
        project_type: request.project_type.clone(),
    }
}

/// Loads a stored project owned by `user_id`, or `NotFound`.
pub async fn fetch_project(state: &AppState, id: i64, user_id: i64) -> Result<ProjectRow, AppError> {
    sqlx::query_as::<_, ProjectRow>(
        "SELECT * FROM generated_projects WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}

/// Approved projects for a resume / job analysis pair, oldest first.
pub async fn approved_projects(
    state: &AppState,
    user_id: i64,
    resume_id: i64,
    job_analysis_id: i64,
) -> Result<Vec<GeneratedProject>, AppError> {
    let rows: Vec<ProjectRow> = sqlx::query_as(
        r#"
        SELECT * FROM generated_projects
        WHERE user_id = $1 AND resume_id = $2 AND job_analysis_id = $3 AND is_approved = TRUE
        ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .bind(resume_id)
    .bind(job_analysis_id)
    .fetch_all(&state.db)
    .await?;

    Ok(rows.into_iter().map(|row| row.project.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::generator::generate_template_project;

    fn gap() -> GapAnalysisResult {
        GapAnalysisResult {
            missing_required_skills: vec!["React".into()],
            missing_technologies: vec!["Docker".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_generation_request_defaults_to_gaps() {
        let requirements = JobRequirements {
            experience_level: "senior".into(),
            industry: Some("fintech".into()),
            ..Default::default()
        };
        let request = GenerateProjectRequest {
            user_id: 1,
            resume_id: 2,
            job_analysis_id: 3,
            ..Default::default()
        };

        let generation = generation_request(&request, &gap(), &requirements);
        assert_eq!(generation.target_skills, vec!["React"]);
        assert_eq!(generation.missing_technologies, vec!["Docker"]);
        assert_eq!(generation.experience_level, "senior");
        assert_eq!(generation.industry.as_deref(), Some("fintech"));
        assert_eq!(generation.time_commitment_weeks, DEFAULT_TIME_COMMITMENT_WEEKS);
    }

    #[test]
    fn test_generation_request_prefers_caller_values() {
        let request = GenerateProjectRequest {
            target_skills: Some(vec!["Rust".into()]),
            missing_technologies: Some(Vec::new()),
            experience_level: Some("entry".into()),
            time_commitment_weeks: Some(8),
            project_type: Some("web".into()),
            ..Default::default()
        };

        let generation = generation_request(&request, &gap(), &JobRequirements::default());
        assert_eq!(generation.target_skills, vec!["Rust"]);
        assert!(generation.missing_technologies.is_empty());
        assert_eq!(generation.experience_level, "entry");
        assert_eq!(generation.time_commitment_weeks, 8);
        assert_eq!(generation.project_type.as_deref(), Some("web"));
    }

    #[test]
    fn test_stored_project_response_carries_validation() {
        let project = generate_template_project(&ProjectGenerationRequest {
            target_skills: vec!["React".into()],
            ..Default::default()
        });
        let row = ProjectRow {
            id: 7,
            user_id: 1,
            resume_id: 2,
            job_analysis_id: 3,
            project: DbJson(project.clone()),
            is_approved: true,
            created_at: Utc::now(),
        };

        let response = ProjectResponse::from(row);
        assert_eq!(response.id, 7);
        assert!(response.is_approved);
        assert_eq!(response.validation_issues, validate_project(&project));
        assert_eq!(response.is_valid, response.validation_issues.is_empty());
        assert_eq!(response.project, project);
    }
}
