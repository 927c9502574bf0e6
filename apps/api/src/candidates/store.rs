use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::store::get_job;
use crate::models::candidate::{
    CandidateAnalysis, CandidateCreate, CandidateRow, CandidateUpdate, INITIAL_STATUS,
};

/// Optional filters for listing a job's candidates.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub status: Option<String>,
    pub min_score: Option<f64>,
}

/// Best match first; unscored candidates last; ties by insertion order.
const SCORE_ORDER: &str = " ORDER BY match_score IS NULL, match_score DESC, id ASC";

fn not_found() -> AppError {
    AppError::NotFound("Candidate not found".to_string())
}

/// Inserts a candidate with status `new`. The owning job must exist;
/// nothing is written when it does not.
pub async fn create_candidate(
    pool: &SqlitePool,
    new_candidate: CandidateCreate,
) -> Result<CandidateRow, AppError> {
    get_job(pool, new_candidate.job_id).await?;
    let candidate = insert_candidate(pool, new_candidate).await?;

    info!("Created candidate {} for job {}", candidate.id, candidate.job_id);
    Ok(candidate)
}

/// A job deleted after the existence check surfaces as a foreign-key
/// violation, reported like a missing job.
async fn insert_candidate(
    pool: &SqlitePool,
    new_candidate: CandidateCreate,
) -> Result<CandidateRow, AppError> {
    let into_docs = |items: Option<Vec<Map<String, Value>>>| {
        items.map(|v| Json(v.into_iter().map(Value::Object).collect::<Vec<_>>()))
    };

    sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (job_id, name, email, linkedin_url, current_title, current_company, location,
             profile_data, experience, education, skills, source, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(new_candidate.job_id)
    .bind(new_candidate.name)
    .bind(new_candidate.email)
    .bind(new_candidate.linkedin_url)
    .bind(new_candidate.current_title)
    .bind(new_candidate.current_company)
    .bind(new_candidate.location)
    .bind(new_candidate.profile_data.map(|p| Json(Value::Object(p))))
    .bind(into_docs(new_candidate.experience))
    .bind(into_docs(new_candidate.education))
    .bind(new_candidate.skills.map(Json))
    .bind(new_candidate.source)
    .bind(INITIAL_STATUS)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::NotFound("Job not found".to_string())
        }
        other => AppError::Database(other),
    })
}

pub async fn get_candidate(pool: &SqlitePool, candidate_id: i64) -> Result<CandidateRow, AppError> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = ?")
        .bind(candidate_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(not_found)
}

/// Lists a job's candidates, best match first. `min_score` excludes unscored rows.
pub async fn list_candidates_for_job(
    pool: &SqlitePool,
    job_id: i64,
    filter: &CandidateFilter,
) -> Result<Vec<CandidateRow>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM candidates WHERE job_id = ");
    query.push_bind(job_id);

    if let Some(status) = &filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(min_score) = filter.min_score {
        query.push(" AND match_score >= ").push_bind(min_score);
    }
    query.push(SCORE_ORDER);

    Ok(query
        .build_query_as::<CandidateRow>()
        .fetch_all(pool)
        .await?)
}

/// Candidates of a job that have never been analyzed, in insertion order.
pub async fn list_unscored_candidates(
    pool: &SqlitePool,
    job_id: i64,
) -> Result<Vec<CandidateRow>, AppError> {
    Ok(sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE job_id = ? AND match_score IS NULL ORDER BY id",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}

/// Applies only the supplied fields. An empty update returns the row unchanged.
pub async fn update_candidate(
    pool: &SqlitePool,
    candidate_id: i64,
    update: &CandidateUpdate,
) -> Result<CandidateRow, AppError> {
    if update.is_empty() {
        return get_candidate(pool, candidate_id).await;
    }

    sqlx::query_as::<_, CandidateRow>(
        r#"
        UPDATE candidates
        SET status = COALESCE(?, status),
            notes = COALESCE(?, notes),
            updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(update.status.as_deref())
    .bind(update.notes.as_deref())
    .bind(Utc::now())
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found)
}

/// Persists an analysis result. Score, analysis, strengths and concerns are
/// always written together.
pub async fn save_analysis(
    pool: &SqlitePool,
    candidate_id: i64,
    result: &CandidateAnalysis,
) -> Result<CandidateRow, AppError> {
    sqlx::query_as::<_, CandidateRow>(
        r#"
        UPDATE candidates
        SET match_score = ?, analysis = ?, strengths = ?, concerns = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(result.match_score)
    .bind(Json(&result.analysis))
    .bind(Json(&result.strengths))
    .bind(Json(&result.concerns))
    .bind(Utc::now())
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(not_found)
}

pub async fn delete_candidate(pool: &SqlitePool, candidate_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM candidates WHERE id = ?")
        .bind(candidate_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found());
    }

    info!("Deleted candidate {candidate_id}");
    Ok(())
}
