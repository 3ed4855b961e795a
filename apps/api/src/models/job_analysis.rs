use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::job_analysis::requirements::JobRequirements;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobAnalysisRow {
    pub id: i64,
    pub user_id: i64,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_description: String,
    pub extracted_requirements: Option<Json<JobRequirements>>,
    pub confidence_score: Option<f64>,
    /// Name of the provider that produced `extracted_requirements`.
    pub analysis_provider: Option<String>,
    pub is_processed: bool,
    pub processing_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobAnalysisRow {
    pub fn requirements(&self) -> JobRequirements {
        self.extracted_requirements
            .as_ref()
            .map(|json| json.0.clone())
            .unwrap_or_default()
    }
}
