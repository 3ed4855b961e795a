//! Axum route handlers for the Real-time Optimization API.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as DbJson;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::gap_analysis::handlers::fetch_resume;
use crate::industry::{detect_industry, IndustryType};
use crate::job_analysis::handlers::{fetch_job_analysis, UserIdQuery};
use crate::job_analysis::requirements::JobRequirements;
use crate::models::resume::ParsedResume;
use crate::realtime::cache::CacheStats;
use crate::realtime::optimizer::{
    analyze_cached, resume_insights, RealTimeAnalyzeRequest, RealTimeOptimizationResult,
};
use crate::state::AppState;

/// Improvement areas reported as high priority; every other area is medium.
const HIGH_PRIORITY_AREAS: &[&str] = &["Keyword optimization", "Industry-specific content"];

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CacheClearedResponse {
    pub cleared: usize,
}

#[derive(Debug, Deserialize)]
pub struct ApplySuggestionRequest {
    pub user_id: i64,
    pub resume_id: i64,
    pub suggestion_id: String,
    /// "summary" or "skills".
    pub section: String,
    #[serde(default)]
    pub field: String,
    pub new_value: String,
}

#[derive(Debug, Serialize)]
pub struct ApplySuggestionResponse {
    pub message: String,
    pub suggestion_id: String,
    pub resume: ParsedResume,
}

#[derive(Debug, Serialize)]
pub struct InsightScores {
    pub overall: f64,
    pub ats: f64,
    pub industry_alignment: f64,
}

#[derive(Debug, Serialize)]
pub struct Recommendations {
    pub high_priority: Vec<String>,
    pub medium_priority: Vec<String>,
    pub suggested_actions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub resume_id: i64,
    pub job_analysis_id: i64,
    pub industry_detected: IndustryType,
    pub industry_confidence: f64,
    pub scores: InsightScores,
    pub keyword_density: BTreeMap<String, usize>,
    pub improvement_areas: Vec<String>,
    pub strengths: Vec<String>,
    pub recommendations: Recommendations,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/realtime/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<RealTimeAnalyzeRequest>,
) -> Result<Json<RealTimeOptimizationResult>, AppError> {
    let result = analyze_cached(&state.suggestion_cache, &request)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("cache key")))?;

    debug!(
        section = %request.change.section,
        suggestions = result.suggestions.len(),
        cache_hit = result.cache_hit,
        "Real-time analysis complete"
    );
    Ok(Json(result))
}

/// POST /api/v1/realtime/cache/clear
pub async fn handle_cache_clear(State(state): State<AppState>) -> Json<CacheClearedResponse> {
    let cleared = state.suggestion_cache.len();
    state.suggestion_cache.clear();
    info!(cleared, "Suggestion cache cleared");
    Json(CacheClearedResponse { cleared })
}

/// GET /api/v1/realtime/cache/stats
pub async fn handle_cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.suggestion_cache.stats())
}

/// POST /api/v1/realtime/apply-suggestion
///
/// Writes an accepted suggestion back into the stored resume.
pub async fn handle_apply_suggestion(
    State(state): State<AppState>,
    Json(request): Json<ApplySuggestionRequest>,
) -> Result<Json<ApplySuggestionResponse>, AppError> {
    let row = fetch_resume(&state, request.resume_id, request.user_id).await?;
    let mut resume = row.parsed();
    apply_to_resume(&mut resume, &request.section, &request.new_value)?;

    sqlx::query("UPDATE resumes SET parsed_data = $1 WHERE id = $2 AND user_id = $3")
        .bind(DbJson(&resume))
        .bind(request.resume_id)
        .bind(request.user_id)
        .execute(&state.db)
        .await?;

    info!(
        resume_id = request.resume_id,
        suggestion_id = %request.suggestion_id,
        section = %request.section,
        field = %request.field,
        "Suggestion applied"
    );

    Ok(Json(ApplySuggestionResponse {
        message: "Suggestion applied successfully".to_string(),
        suggestion_id: request.suggestion_id,
        resume,
    }))
}

/// GET /api/v1/realtime/insights/:resume_id/:job_analysis_id?user_id=
///
/// Whole-resume scores and prioritized recommendations for a stored pair.
pub async fn handle_insights(
    State(state): State<AppState>,
    Path((resume_id, job_analysis_id)): Path<(i64, i64)>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<InsightsResponse>, AppError> {
    let resume = fetch_resume(&state, resume_id, params.user_id).await?;
    let job = fetch_job_analysis(&state, job_analysis_id, params.user_id).await?;
    let requirements = job.requirements();

    let company_info = [job.company_name.as_deref(), requirements.industry.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let industry = detect_industry(&job.job_description, &company_info);

    Ok(Json(build_insights(
        resume_id,
        job_analysis_id,
        &resume.parsed(),
        &requirements,
        industry,
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Sets the summary, or replaces the skills with the comma-separated list.
pub fn apply_to_resume(
    resume: &mut ParsedResume,
    section: &str,
    new_value: &str,
) -> Result<(), AppError> {
    match section {
        "summary" => resume.summary = Some(new_value.trim().to_string()),
        "skills" => {
            resume.skills = new_value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        other => {
            return Err(AppError::Validation(format!(
                "Suggestions cannot be applied to section '{other}'"
            )))
        }
    }
    Ok(())
}

pub fn build_insights(
    resume_id: i64,
    job_analysis_id: i64,
    resume: &ParsedResume,
    requirements: &JobRequirements,
    (industry, confidence): (IndustryType, f64),
) -> InsightsResponse {
    let insights = resume_insights(resume, requirements, industry);
    let (high_priority, medium_priority): (Vec<String>, Vec<String>) = insights
        .improvement_areas
        .iter()
        .cloned()
        .partition(|area| HIGH_PRIORITY_AREAS.contains(&area.as_str()));

    InsightsResponse {
        resume_id,
        job_analysis_id,
        industry_detected: industry,
        industry_confidence: confidence,
        scores: InsightScores {
            overall: insights.overall_score,
            ats: insights.ats_score,
            industry_alignment: insights.industry_alignment,
        },
        keyword_density: insights.keyword_density,
        improvement_areas: insights.improvement_areas,
        strengths: insights.strengths,
        recommendations: Recommendations {
            high_priority,
            medium_priority,
            suggested_actions: vec![
                format!("Add more {} industry keywords", industry.as_str()),
                "Include quantified achievements".to_string(),
                "Optimize section ordering".to_string(),
                "Enhance professional summary".to_string(),
            ],
        },
    }
}
