use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::{JobCreate, JobRow};

pub const DEFAULT_LIMIT: i64 = 100;

/// Inserts a job together with its already-extracted requirements.
pub async fn create_job(
    pool: &SqlitePool,
    new_job: &JobCreate,
    requirements: Value,
) -> Result<JobRow, AppError> {
    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (title, company, description, requirements, location, job_type, salary_range, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new_job.title)
    .bind(&new_job.company)
    .bind(&new_job.description)
    .bind(Json(requirements))
    .bind(&new_job.location)
    .bind(&new_job.job_type)
    .bind(&new_job.salary_range)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!("Created job {} ({} at {})", job.id, job.title, job.company);
    Ok(job)
}

pub async fn get_job(pool: &SqlitePool, job_id: i64) -> Result<JobRow, AppError> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ?")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

pub async fn list_jobs(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<JobRow>, AppError> {
    Ok(
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY id LIMIT ? OFFSET ?")
            .bind(limit)
            .bind(skip)
            .fetch_all(pool)
            .await?,
    )
}

/// Deletes a job. Its candidates go with it through `ON DELETE CASCADE`.
pub async fn delete_job(pool: &SqlitePool, job_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(job_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    info!("Deleted job {job_id}");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::test_pool;

    pub(crate) fn sample_job(title: &str) -> JobCreate {
        JobCreate {
            title: title.to_string(),
            company: "Acme".to_string(),
            description: "Own the Rust ingestion pipeline.".to_string(),
            location: Some("Remote".to_string()),
            job_type: Some("Full-time".to_string()),
            salary_range: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_job() {
        let pool = test_pool().await;
        let created = create_job(&pool, &sample_job("Backend Engineer"), json!({"required_skills": ["Rust"]}))
            .await
            .unwrap();

        let fetched = get_job(&pool, created.id).await.unwrap();
        assert_eq!(fetched.title, "Backend Engineer");
        assert_eq!(
            fetched.requirements.map(|r| r.0),
            Some(json!({"required_skills": ["Rust"]}))
        );
        assert!(fetched.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_job_is_not_found() {
        let pool = test_pool().await;
        let err = get_job(&pool, 999_999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_jobs_paginates() {
        let pool = test_pool().await;
        for title in ["A", "B", "C"] {
            create_job(&pool, &sample_job(title), json!({})).await.unwrap();
        }

        let page = list_jobs(&pool, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "B");
        assert_eq!(list_jobs(&pool, 0, DEFAULT_LIMIT).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_job_is_not_found() {
        let pool = test_pool().await;
        assert!(matches!(
            delete_job(&pool, 42).await,
            Err(AppError::NotFound(_))
        ));
    }
}
