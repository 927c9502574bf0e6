//! Batch analysis: scores every unscored candidate of a job, one model call
//! at a time. A failing candidate is recorded and the loop moves on.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::analysis::analyzer::analyze_candidate;
use crate::candidates::store::{list_unscored_candidates, save_analysis};
use crate::errors::AppError;
use crate::llm_client::AiGateway;
use crate::models::candidate::CandidateRow;
use crate::models::job::JobRow;

/// Outcome for one candidate, serialized with a `status` of `success` or `error`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Success {
        candidate_id: i64,
        name: String,
        match_score: f64,
    },
    Error {
        candidate_id: i64,
        name: String,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BatchAnalysisResponse {
    pub job_id: i64,
    pub total_analyzed: usize,
    pub results: Vec<BatchOutcome>,
}

/// Analyzes the job's unscored candidates in insertion order. Results keep
/// that order. Only the initial listing can fail the whole batch.
pub async fn analyze_unscored_for_job(
    pool: &SqlitePool,
    ai: &AiGateway,
    job: &JobRow,
) -> Result<BatchAnalysisResponse, AppError> {
    let candidates = list_unscored_candidates(pool, job.id).await?;
    info!(
        "Batch analysis for job {}: {} unscored candidates",
        job.id,
        candidates.len()
    );

    let mut results = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        results.push(analyze_one(pool, ai, job, candidate).await);
    }

    Ok(BatchAnalysisResponse {
        job_id: job.id,
        total_analyzed: results.len(),
        results,
    })
}

async fn analyze_one(
    pool: &SqlitePool,
    ai: &AiGateway,
    job: &JobRow,
    candidate: CandidateRow,
) -> BatchOutcome {
    let outcome = match analyze_candidate(&candidate, job, ai).await {
        Ok(result) => save_analysis(pool, candidate.id, &result)
            .await
            .map(|_| result.match_score)
            .map_err(|e| e.to_string()),
        Err(e) => Err(format!("Failed to analyze candidate: {e}")),
    };

    match outcome {
        Ok(match_score) => BatchOutcome::Success {
            candidate_id: candidate.id,
            name: candidate.name,
            match_score,
        },
        Err(error) => {
            warn!("Batch analysis failed for candidate {}: {error}", candidate.id);
            BatchOutcome::Error {
                candidate_id: candidate.id,
                name: candidate.name,
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::candidates::store::{create_candidate, get_candidate, tests::sample_candidate};
    use crate::db::test_pool;
    use crate::jobs::store::{create_job, tests::sample_job};
    use crate::llm_client::fake::FakeBackend;

    #[tokio::test]
    async fn test_one_failure_does_not_abort_batch() {
        let pool = test_pool().await;
        let job = create_job(&pool, &sample_job("Engineer"), json!({})).await.unwrap();
        let mut ids = Vec::new();
        for name in ["Alice Archer", "Bob Builder", "Carol Coder"] {
            ids.push(create_candidate(&pool, sample_candidate(job.id, name)).await.unwrap().id);
        }

        let ai = FakeBackend::replying(r#"{"match_score": 70, "strengths": ["a"], "concerns": []}"#)
            .fail_when("Bob Builder", "model overloaded")
            .into_gateway();

        let response = analyze_unscored_for_job(&pool, &ai, &job).await.unwrap();

        assert_eq!(response.total_analyzed, 3);
        assert_eq!(response.results.len(), 3);
        let errors: Vec<_> = response
            .results
            .iter()
            .filter_map(|r| match r {
                BatchOutcome::Error { name, error, .. } => Some((name.clone(), error.clone())),
                BatchOutcome::Success { .. } => None,
            })
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "Bob Builder");
        assert!(errors[0].1.contains("model overloaded"));

        // results keep insertion order
        let result_ids: Vec<i64> = response
            .results
            .iter()
            .map(|r| match r {
                BatchOutcome::Success { candidate_id, .. } | BatchOutcome::Error { candidate_id, .. } => {
                    *candidate_id
                }
            })
            .collect();
        assert_eq!(result_ids, ids);

        assert_eq!(get_candidate(&pool, ids[0]).await.unwrap().match_score, Some(70.0));
        assert_eq!(get_candidate(&pool, ids[1]).await.unwrap().match_score, None);
        assert_eq!(get_candidate(&pool, ids[2]).await.unwrap().match_score, Some(70.0));
    }

    #[tokio::test]
    async fn test_already_scored_candidates_are_skipped() {
        let pool = test_pool().await;
        let job = create_job(&pool, &sample_job("Engineer"), json!({})).await.unwrap();
        create_candidate(&pool, sample_candidate(job.id, "Dana")).await.unwrap();
        let ai = FakeBackend::replying(r#"{"match_score": 55}"#).into_gateway();

        let first = analyze_unscored_for_job(&pool, &ai, &job).await.unwrap();
        let second = analyze_unscored_for_job(&pool, &ai, &job).await.unwrap();

        assert_eq!(first.total_analyzed, 1);
        assert_eq!(second.total_analyzed, 0);
        assert!(second.results.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_marks_every_candidate_failed() {
        let pool = test_pool().await;
        let job = create_job(&pool, &sample_job("Engineer"), json!({})).await.unwrap();
        create_candidate(&pool, sample_candidate(job.id, "Eve")).await.unwrap();
        create_candidate(&pool, sample_candidate(job.id, "Frank")).await.unwrap();

        let response = analyze_unscored_for_job(&pool, &AiGateway::unconfigured(), &job)
            .await
            .unwrap();

        assert_eq!(response.total_analyzed, 2);
        assert!(response
            .results
            .iter()
            .all(|r| matches!(r, BatchOutcome::Error { error, .. } if error.contains("not configured"))));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let success = serde_json::to_value(BatchOutcome::Success {
            candidate_id: 1,
            name: "A".into(),
            match_score: 80.0,
        })
        .unwrap();
        assert_eq!(
            success,
            json!({"status": "success", "candidate_id": 1, "name": "A", "match_score": 80.0})
        );

        let error = serde_json::to_value(BatchOutcome::Error {
            candidate_id: 2,
            name: "B".into(),
            error: "boom".into(),
        })
        .unwrap();
        assert_eq!(error["status"], json!("error"));
        assert_eq!(error["error"], json!("boom"));
    }
}
