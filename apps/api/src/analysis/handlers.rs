//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::analysis::analyzer::analyze_candidate;
use crate::analysis::batch::{analyze_unscored_for_job, BatchAnalysisResponse};
use crate::candidates::profile_parser::parse_linkedin_profile;
use crate::candidates::store::{get_candidate, save_analysis};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::jobs::store::get_job;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub candidate_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub candidate_id: i64,
    pub match_score: f64,
    pub analysis: Value,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParseProfileRequest {
    pub profile_text: String,
}

/// POST /api/analysis/analyze
///
/// Scores one candidate against their job and persists the result.
/// Gateway failures are returned as errors; nothing is written in that case.
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let candidate = get_candidate(&state.db, request.candidate_id).await?;
    let job = get_job(&state.db, candidate.job_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Associated job not found".to_string()),
            other => other,
        })?;

    let result = analyze_candidate(&candidate, &job, &state.ai)
        .await
        .map_err(|e| AppError::from_gateway("Failed to analyze candidate", e))?;

    save_analysis(&state.db, candidate.id, &result).await?;
    info!(
        "Analyzed candidate {} for job {}: score {}",
        candidate.id, job.id, result.match_score
    );

    Ok(Json(AnalyzeResponse {
        candidate_id: candidate.id,
        match_score: result.match_score,
        analysis: result.analysis,
        strengths: result.strengths,
        concerns: result.concerns,
    }))
}

/// POST /api/analysis/batch-analyze/:job_id
///
/// Always 200 once the job exists; per-candidate failures are reported in `results`.
pub async fn handle_batch_analyze(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<BatchAnalysisResponse>, AppError> {
    let job = get_job(&state.db, job_id).await?;
    let response = analyze_unscored_for_job(&state.db, &state.ai, &job).await?;
    Ok(Json(response))
}

/// POST /api/analysis/parse-profile
///
/// Structures raw LinkedIn profile text. Failures come back as `{"error": ...}`.
pub async fn handle_parse_profile(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ParseProfileRequest>,
) -> Result<Json<Value>, AppError> {
    if request.profile_text.trim().is_empty() {
        return Err(AppError::Validation(
            "profile_text cannot be empty".to_string(),
        ));
    }

    Ok(Json(
        parse_linkedin_profile(&request.profile_text, &state.ai).await,
    ))
}
