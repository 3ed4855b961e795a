use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::projects::generator::GeneratedProject;

/// A generated project persisted for a resume / job analysis pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub user_id: i64,
    pub resume_id: i64,
    pub job_analysis_id: i64,
    pub project: Json<GeneratedProject>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}
