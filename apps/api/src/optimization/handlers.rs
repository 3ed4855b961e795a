//! Axum route handlers for the Resume Optimization API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::gap_analysis::handlers::fetch_resume;
use crate::job_analysis::handlers::fetch_job_analysis;
use crate::optimization::ats::{ats_keywords, AtsKeywords};
use crate::optimization::optimizer::{
    optimize_resume, score_resume, OptimizationContext, OptimizationRequest, OptimizedResume,
    ResumeScore,
};
use crate::projects::handlers::approved_projects;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OptimizeResumeRequest {
    pub user_id: i64,
    pub resume_id: i64,
    pub job_analysis_id: i64,
    #[serde(flatten)]
    pub options: OptimizationRequest,
}

#[derive(Debug, Deserialize)]
pub struct ScoreResumeRequest {
    pub user_id: i64,
    pub resume_id: i64,
    pub job_analysis_id: i64,
}

/// POST /api/v1/resume-optimization/optimize
///
/// Rewrites the resume for the job, merging in approved generated projects.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeResumeRequest>,
) -> Result<Json<OptimizedResume>, AppError> {
    if request.options.target_job_title.trim().is_empty() {
        return Err(AppError::Validation(
            "Target job title cannot be empty".to_string(),
        ));
    }

    let resume = fetch_resume(&state, request.resume_id, request.user_id).await?;
    let job = fetch_job_analysis(&state, request.job_analysis_id, request.user_id).await?;
    let projects = approved_projects(
        &state,
        request.user_id,
        request.resume_id,
        request.job_analysis_id,
    )
    .await?;

    let parsed = resume.parsed();
    let requirements = job.requirements();
    let ctx = OptimizationContext {
        resume: &parsed,
        requirements: &requirements,
        job_description: &job.job_description,
        request: &request.options,
        approved_projects: &projects,
    };
    let optimized = optimize_resume(&ctx, &state.llm_providers).await;

    info!(
        resume_id = resume.id,
        job_analysis_id = job.id,
        ats_score = optimized.ats_score,
        "Resume optimized"
    );

    Ok(Json(optimized))
}

/// POST /api/v1/resume-optimization/preview
///
/// Same result as `/optimize`; nothing is stored by either.
pub async fn handle_preview(
    state: State<AppState>,
    request: Json<OptimizeResumeRequest>,
) -> Result<Json<OptimizedResume>, AppError> {
    handle_optimize(state, request).await
}

/// POST /api/v1/resume-optimization/score
///
/// ATS score of the stored resume against the job, without rewriting it.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreResumeRequest>,
) -> Result<Json<ResumeScore>, AppError> {
    let resume = fetch_resume(&state, request.resume_id, request.user_id).await?;
    let job = fetch_job_analysis(&state, request.job_analysis_id, request.user_id).await?;

    Ok(Json(score_resume(&resume.parsed(), &job.requirements())))
}

/// GET /api/v1/resume-optimization/ats-keywords/:industry
pub async fn handle_ats_keywords(Path(industry): Path<String>) -> Json<AtsKeywords> {
    Json(ats_keywords(&industry))
}
