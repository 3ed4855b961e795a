//! Axum route handlers for the Gap Analysis API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::info;

use crate::errors::AppError;
use crate::gap_analysis::analyzer::{analyze_gap, GapAnalysisResult};
use crate::job_analysis::handlers::{fetch_job_analysis, UserIdQuery};
use crate::models::job_analysis::JobAnalysisRow;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GapAnalysisRequest {
    pub user_id: i64,
    pub resume_id: i64,
    pub job_analysis_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GapAnalysisResponse {
    pub resume_id: i64,
    pub job_analysis_id: i64,
    #[serde(flatten)]
    pub result: GapAnalysisResult,
}

/// Selection summary of a processed job analysis.
#[derive(Debug, Serialize, FromRow)]
pub struct CompatibleJob {
    pub id: i64,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub confidence_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct QuickMatchResponse {
    pub match_score: f64,
    pub matching_skills_count: usize,
    pub missing_required_count: usize,
    pub experience_level_match: bool,
    pub summary: String,
}

impl From<&GapAnalysisResult> for QuickMatchResponse {
    fn from(gap: &GapAnalysisResult) -> Self {
        Self {
            match_score: gap.overall_match_score,
            matching_skills_count: gap.matching_skills.len(),
            missing_required_count: gap.missing_required_skills.len(),
            experience_level_match: gap.experience_level_match,
            summary: match_summary(gap),
        }
    }
}

/// "80.0% match - 2 critical gaps"
pub fn match_summary(gap: &GapAnalysisResult) -> String {
    format!(
        "{:.1}% match - {} critical gaps",
        gap.overall_match_score * 100.0,
        gap.missing_required_skills.len()
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/gap-analysis/analyze
///
/// Full comparison of a processed resume against a processed job analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<GapAnalysisResponse>, AppError> {
    let (resume, job) =
        load_processed_pair(&state, request.user_id, request.resume_id, request.job_analysis_id)
            .await?;

    let result = analyze_gap(&resume.parsed(), &job.requirements());

    info!(
        resume_id = resume.id,
        job_analysis_id = job.id,
        score = result.overall_match_score,
        "Gap analysis complete"
    );

    Ok(Json(GapAnalysisResponse {
        resume_id: resume.id,
        job_analysis_id: job.id,
        result,
    }))
}

/// GET /api/v1/gap-analysis/resume/:resume_id/jobs?user_id=
///
/// Processed job analyses the resume can be compared against, newest first.
pub async fn handle_compatible_jobs(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CompatibleJob>>, AppError> {
    fetch_resume(&state, resume_id, params.user_id).await?;

    let jobs = sqlx::query_as::<_, CompatibleJob>(
        r#"
        SELECT id, job_title, company_name, confidence_score, created_at
        FROM job_analyses
        WHERE user_id = $1 AND is_processed = TRUE
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(jobs))
}

/// GET /api/v1/gap-analysis/quick-match/:resume_id/:job_analysis_id?user_id=
///
/// Headline numbers only. Does not require either side to be processed.
pub async fn handle_quick_match(
    State(state): State<AppState>,
    Path((resume_id, job_analysis_id)): Path<(i64, i64)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<QuickMatchResponse>, AppError> {
    let resume = fetch_resume(&state, resume_id, params.user_id).await?;
    let job = fetch_job_analysis(&state, job_analysis_id, params.user_id).await?;

    let result = analyze_gap(&resume.parsed(), &job.requirements());

    Ok(Json(QuickMatchResponse::from(&result)))
}

/// Loads a resume owned by `user_id`, or `NotFound`.
pub async fn fetch_resume(state: &AppState, id: i64, user_id: i64) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// Loads both sides of a comparison, rejecting either one that has not been
/// processed yet.
pub async fn load_processed_pair(
    state: &AppState,
    user_id: i64,
    resume_id: i64,
    job_analysis_id: i64,
) -> Result<(ResumeRow, JobAnalysisRow), AppError> {
    let resume = fetch_resume(state, resume_id, user_id).await?;
    if !resume.is_processed {
        return Err(AppError::Validation(
            "Resume is not yet processed".to_string(),
        ));
    }

    let job = fetch_job_analysis(state, job_analysis_id, user_id).await?;
    if !job.is_processed {
        return Err(AppError::Validation(
            "Job analysis is not yet processed".to_string(),
        ));
    }

    Ok((resume, job))
}
