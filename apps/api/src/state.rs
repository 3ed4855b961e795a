use std::sync::Arc;

use sqlx::PgPool;

use crate::job_analysis::analyzer::RequirementsAnalyzer;
use crate::llm_client::SharedProvider;
use crate::realtime::optimizer::RealTimeOptimizationResult;
use crate::realtime::SuggestionCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Completion providers in fallback order (OpenAI, then Gemini).
    pub llm_providers: Arc<Vec<SharedProvider>>,
    /// LLM chain over `llm_providers`, ending in rule-based extraction.
    pub requirements_analyzer: Arc<RequirementsAnalyzer>,
    pub suggestion_cache: Arc<SuggestionCache<RealTimeOptimizationResult>>,
}

impl AppState {
    pub fn new(db: PgPool, llm_providers: Vec<SharedProvider>, cache_capacity: usize) -> Self {
        let requirements_analyzer = RequirementsAnalyzer::from_llm(&llm_providers);
        let suggestion_cache = SuggestionCache::new(cache_capacity);
        Self {
            db,
            llm_providers: Arc::new(llm_providers),
            requirements_analyzer: Arc::new(requirements_analyzer),
            suggestion_cache: Arc::new(suggestion_cache),
        }
    }
}
