pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::gap_analysis::handlers as gap_analysis;
use crate::job_analysis::handlers as job_analysis;
use crate::optimization::handlers as optimization;
use crate::projects::handlers as projects;
use crate::realtime::handlers as realtime;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job analysis
        .route("/api/v1/job-analysis", get(job_analysis::handle_list))
        .route(
            "/api/v1/job-analysis/analyze",
            post(job_analysis::handle_analyze),
        )
        .route(
            "/api/v1/job-analysis/extract",
            post(job_analysis::handle_extract),
        )
        .route(
            "/api/v1/job-analysis/:id",
            get(job_analysis::handle_get).delete(job_analysis::handle_delete),
        )
        // Gap analysis
        .route(
            "/api/v1/gap-analysis/analyze",
            post(gap_analysis::handle_analyze),
        )
        .route(
            "/api/v1/gap-analysis/resume/:resume_id/jobs",
            get(gap_analysis::handle_compatible_jobs),
        )
        .route(
            "/api/v1/gap-analysis/quick-match/:resume_id/:job_analysis_id",
            get(gap_analysis::handle_quick_match),
        )
        // Projects
        .route("/api/v1/projects", get(projects::handle_list))
        .route("/api/v1/projects/generate", post(projects::handle_generate))
        .route(
            "/api/v1/projects/:id",
            get(projects::handle_get).delete(projects::handle_delete),
        )
        .route("/api/v1/projects/:id/approve", post(projects::handle_approve))
        .route(
            "/api/v1/projects/:id/regenerate",
            post(projects::handle_regenerate),
        )
        // Resume optimization
        .route(
            "/api/v1/resume-optimization/optimize",
            post(optimization::handle_optimize),
        )
        .route(
            "/api/v1/resume-optimization/preview",
            post(optimization::handle_preview),
        )
        .route(
            "/api/v1/resume-optimization/score",
            post(optimization::handle_score),
        )
        .route(
            "/api/v1/resume-optimization/ats-keywords/:industry",
            get(optimization::handle_ats_keywords),
        )
        // Real-time optimization
        .route("/api/v1/realtime/analyze", post(realtime::handle_analyze))
        .route(
            "/api/v1/realtime/cache/clear",
            post(realtime::handle_cache_clear),
        )
        .route(
            "/api/v1/realtime/cache/stats",
            get(realtime::handle_cache_stats),
        )
        .route(
            "/api/v1/realtime/apply-suggestion",
            post(realtime::handle_apply_suggestion),
        )
        .route(
            "/api/v1/realtime/insights/:resume_id/:job_analysis_id",
            get(realtime::handle_insights),
        )
        .with_state(state)
}
