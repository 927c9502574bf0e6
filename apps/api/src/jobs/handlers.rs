//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::jobs::requirements::extract_job_requirements;
use crate::jobs::store::{self, DEFAULT_LIMIT};
use crate::models::job::{JobCreate, JobRow};
use crate::models::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT as u32
}

/// POST /api/jobs
///
/// Extracts requirements from the description before inserting. Extraction
/// failures are stored in `requirements` rather than failing the request.
pub async fn handle_create_job(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<JobCreate>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    request.validate()?;

    let requirements = extract_job_requirements(&request.description, &state.ai).await;
    let job = store::create_job(&state.db, &request, requirements).await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs?skip=&limit=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = store::list_jobs(&state.db, params.skip.into(), params.limit.into()).await?;
    Ok(Json(jobs))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<JobRow>, AppError> {
    Ok(Json(store::get_job(&state.db, job_id).await?))
}

/// DELETE /api/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    store::delete_job(&state.db, job_id).await?;
    Ok(Json(MessageResponse::new("Job deleted successfully")))
}
