//! Axum route handlers for the Candidates API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::candidates::store::{self, CandidateFilter};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::candidate::{CandidateCreate, CandidateRow, CandidateUpdate};
use crate::models::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListCandidatesQuery {
    pub status: Option<String>,
    pub min_score: Option<f64>,
}

impl From<ListCandidatesQuery> for CandidateFilter {
    fn from(query: ListCandidatesQuery) -> Self {
        CandidateFilter {
            // `?status=` means no filter
            status: query.status.filter(|s| !s.is_empty()),
            min_score: query.min_score,
        }
    }
}

/// POST /api/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CandidateCreate>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    request.validate()?;
    let candidate = store::create_candidate(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /api/candidates/job/:job_id?status=&min_score=
///
/// Best match first; unscored candidates are listed last.
pub async fn handle_list_candidates_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<ListCandidatesQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let filter = CandidateFilter::from(params);
    let candidates = store::list_candidates_for_job(&state.db, job_id, &filter).await?;
    Ok(Json(candidates))
}

/// GET /api/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<CandidateRow>, AppError> {
    Ok(Json(store::get_candidate(&state.db, candidate_id).await?))
}

/// PATCH /api/candidates/:id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<i64>,
    ApiJson(update): ApiJson<CandidateUpdate>,
) -> Result<Json<CandidateRow>, AppError> {
    update.validate()?;
    Ok(Json(
        store::update_candidate(&state.db, candidate_id, &update).await?,
    ))
}

/// DELETE /api/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    store::delete_candidate(&state.db, candidate_id).await?;
    Ok(Json(MessageResponse::new("Candidate deleted successfully")))
}
