use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;

/// Creates and returns a PostgreSQL connection pool.
/// The `resumes` table is owned by the upstream parsing service.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

struct Migration {
    id: i32,
    description: &'static str,
    sql: &'static str,
}

/// Schema for the tables this service writes. Statements are idempotent so a
/// database that already has the tables only gains what is missing.
const MIGRATIONS: &[Migration] = &[
    Migration {
        id: 1,
        description: "job analyses with provider attribution",
        sql: r#"
CREATE TABLE IF NOT EXISTS job_analyses (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL,
    job_title TEXT,
    company_name TEXT,
    job_description TEXT NOT NULL,
    extracted_requirements JSONB,
    confidence_score DOUBLE PRECISION,
    is_processed BOOLEAN NOT NULL DEFAULT FALSE,
    processing_error TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

ALTER TABLE job_analyses ADD COLUMN IF NOT EXISTS analysis_provider TEXT;

CREATE INDEX IF NOT EXISTS idx_job_analyses_user_created
    ON job_analyses(user_id, created_at DESC);
"#,
    },
    Migration {
        id: 2,
        description: "generated learning projects",
        sql: r#"
CREATE TABLE IF NOT EXISTS generated_projects (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL,
    resume_id BIGINT NOT NULL,
    job_analysis_id BIGINT NOT NULL,
    project JSONB NOT NULL,
    is_approved BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_generated_projects_pair
    ON generated_projects(user_id, resume_id, job_analysis_id);
"#,
    },
];

/// Applies every migration not yet recorded in `gapwise_schema_migrations`,
/// each in its own transaction.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    pool.execute(
        "CREATE TABLE IF NOT EXISTS gapwise_schema_migrations (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .await
    .context("Failed to create migrations table")?;

    for migration in MIGRATIONS {
        let (already_applied,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM gapwise_schema_migrations WHERE id = $1)",
        )
        .bind(migration.id)
        .fetch_one(pool)
        .await?;

        if already_applied {
            continue;
        }

        let mut tx = pool.begin().await?;
        tx.execute(migration.sql)
            .await
            .with_context(|| format!("Migration {} failed", migration.id))?;
        sqlx::query("INSERT INTO gapwise_schema_migrations (id, description) VALUES ($1, $2)")
            .bind(migration.id)
            .bind(migration.description)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(
            id = migration.id,
            description = migration.description,
            "Applied migration"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_analysis::JobAnalysisRow;
    use crate::models::project::ProjectRow;
    use crate::projects::generator::{generate_template_project, ProjectGenerationRequest};
    use chrono::Utc;
    use sqlx::types::Json;

    fn migrated_sql() -> String {
        MIGRATIONS.iter().map(|m| m.sql).collect()
    }

    fn assert_columns_created<T: serde::Serialize>(row: &T) {
        let sql = migrated_sql();
        let json = serde_json::to_value(row).unwrap();
        for column in json.as_object().unwrap().keys() {
            assert!(sql.contains(&format!("{column} ")), "missing column {column}");
        }
    }

    #[test]
    fn test_migration_ids_increase() {
        assert!(MIGRATIONS.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_job_analysis_columns_are_migrated() {
        assert_columns_created(&JobAnalysisRow {
            id: 1,
            user_id: 1,
            job_title: None,
            company_name: None,
            job_description: String::new(),
            extracted_requirements: None,
            confidence_score: None,
            analysis_provider: None,
            is_processed: false,
            processing_error: None,
            created_at: Utc::now(),
        });
    }

    #[test]
    fn test_project_columns_are_migrated() {
        let project = generate_template_project(&ProjectGenerationRequest {
            target_skills: vec!["React".into()],
            ..Default::default()
        });
        assert_columns_created(&ProjectRow {
            id: 1,
            user_id: 1,
            resume_id: 2,
            job_analysis_id: 3,
            project: Json(project),
            is_approved: false,
            created_at: Utc::now(),
        });
    }
}
