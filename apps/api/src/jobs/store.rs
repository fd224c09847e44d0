use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::jobs::search::JobSearch;
use crate::models::job::{JobInput, JobRow};

/// Persistence seam for job records. Every operation is scoped to the
/// owning user; a job owned by someone else behaves as if it did not exist.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// The user's jobs matching `search`, newest application first.
    async fn list(&self, user_id: &str, search: &JobSearch) -> Result<Vec<JobRow>>;

    async fn find(&self, id: i32, user_id: &str) -> Result<Option<JobRow>>;

    async fn insert(&self, user_id: &str, input: &JobInput) -> Result<JobRow>;

    /// Overwrites the job and bumps its version. `None` when nothing matched,
    /// including when `expected_version` is stale.
    async fn update(
        &self,
        id: i32,
        user_id: &str,
        expected_version: Option<i32>,
        input: &JobInput,
    ) -> Result<Option<JobRow>>;

    async fn exists(&self, id: i32, user_id: &str) -> Result<bool>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32, user_id: &str) -> Result<bool>;
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        PgJobStore { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list(&self, user_id: &str, search: &JobSearch) -> Result<Vec<JobRow>> {
        Ok(sqlx::query_as::<_, JobRow>(
            r#"
            SELECT *
            FROM jobs
            WHERE user_id = $1
              AND ($2::text IS NULL OR company ILIKE $2)
              AND ($3::text IS NULL OR description ILIKE $3)
            ORDER BY application_date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(search.company_pattern())
        .bind(search.description_pattern())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find(&self, id: i32, user_id: &str) -> Result<Option<JobRow>> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert(&self, user_id: &str, input: &JobInput) -> Result<JobRow> {
        Ok(sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (user_id, company, description, link, application_date, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&input.company)
        .bind(&input.description)
        .bind(&input.link)
        .bind(input.application_date)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update(
        &self,
        id: i32,
        user_id: &str,
        expected_version: Option<i32>,
        input: &JobInput,
    ) -> Result<Option<JobRow>> {
        Ok(sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET company = $3,
                description = $4,
                link = $5,
                application_date = $6,
                status = $7,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1
              AND user_id = $2
              AND ($8::int4 IS NULL OR version = $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.company)
        .bind(&input.description)
        .bind(&input.link)
        .bind(input.application_date)
        .bind(&input.status)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn exists(&self, id: i32, user_id: &str) -> Result<bool> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete(&self, id: i32, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
