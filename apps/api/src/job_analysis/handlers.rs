//! Axum route handlers for the Job Analysis API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as DbJson;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::job_analysis::requirements::JobRequirements;
use crate::job_analysis::rule_based::{clean_job_description, extract_basic_requirements};
use crate::models::job_analysis::JobAnalysisRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct JobAnalysisRequest {
    pub user_id: i64,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct JobAnalysisResponse {
    pub id: i64,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub is_processed: bool,
    pub confidence_score: Option<f64>,
    pub analysis_provider: Option<String>,
    pub processing_error: Option<String>,
    pub extracted_requirements: Option<JobRequirements>,
    pub created_at: DateTime<Utc>,
}

impl From<JobAnalysisRow> for JobAnalysisResponse {
    fn from(row: JobAnalysisRow) -> Self {
        Self {
            id: row.id,
            job_title: row.job_title,
            company_name: row.company_name,
            is_processed: row.is_processed,
            confidence_score: row.confidence_score,
            analysis_provider: row.analysis_provider,
            processing_error: row.processing_error,
            extracted_requirements: row.extracted_requirements.map(|json| json.0),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub requirements: JobRequirements,
    pub confidence_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/job-analysis/analyze
///
/// Stores the description, runs the provider chain and records either the
/// extracted requirements or the processing error on the same row.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<JobAnalysisRequest>,
) -> Result<Json<JobAnalysisResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }

    let row: JobAnalysisRow = sqlx::query_as(
        r#"
        INSERT INTO job_analyses (user_id, job_title, company_name, job_description, is_processed)
        VALUES ($1, $2, $3, $4, FALSE)
        RETURNING *
        "#,
    )
    .bind(request.user_id)
    .bind(&request.job_title)
    .bind(&request.company_name)
    .bind(&request.job_description)
    .fetch_one(&state.db)
    .await?;

    let row: JobAnalysisRow = match state
        .requirements_analyzer
        .analyze_job_description(&request.job_description)
        .await
    {
        Ok(analyzed) => {
            info!(
                job_analysis_id = row.id,
                provider = analyzed.provider,
                "Stored job analysis"
            );
            sqlx::query_as(
                r#"
                UPDATE job_analyses
                SET extracted_requirements = $1, confidence_score = $2,
                    analysis_provider = $3, is_processed = TRUE
                WHERE id = $4
                RETURNING *
                "#,
            )
            .bind(DbJson(&analyzed.requirements))
            .bind(analyzed.confidence_score)
            .bind(analyzed.provider)
            .bind(row.id)
            .fetch_one(&state.db)
            .await?
        }
        Err(e) => {
            warn!(job_analysis_id = row.id, "Job analysis failed: {e}");
            sqlx::query_as(
                r#"
                UPDATE job_analyses
                SET processing_error = $1, is_processed = TRUE
                WHERE id = $2
                RETURNING *
                "#,
            )
            .bind(e.to_string())
            .bind(row.id)
            .fetch_one(&state.db)
            .await?
        }
    };

    Ok(Json(row.into()))
}

/// GET /api/v1/job-analysis?user_id=
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<JobAnalysisResponse>>, AppError> {
    let rows: Vec<JobAnalysisRow> = sqlx::query_as(
        "SELECT * FROM job_analyses WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/job-analysis/:id?user_id=
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<JobAnalysisResponse>, AppError> {
    let row = fetch_job_analysis(&state, id, params.user_id).await?;
    Ok(Json(row.into()))
}

/// DELETE /api/v1/job-analysis/:id?user_id=
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM job_analyses WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job analysis {id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/job-analysis/extract
///
/// Rule-based extraction preview. Touches neither the database nor any LLM.
pub async fn handle_extract(
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }

    let requirements =
        extract_basic_requirements(&clean_job_description(&request.job_description)).validate();
    let confidence_score = requirements.confidence_score();

    Ok(Json(ExtractResponse {
        requirements,
        confidence_score,
    }))
}

/// Loads a job analysis owned by `user_id`, or `NotFound`.
pub async fn fetch_job_analysis(
    state: &AppState,
    id: i64,
    user_id: i64,
) -> Result<JobAnalysisRow, AppError> {
    sqlx::query_as::<_, JobAnalysisRow>(
        "SELECT * FROM job_analyses WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job analysis {id} not found")))
}
