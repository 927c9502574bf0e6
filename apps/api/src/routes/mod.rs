pub mod health;


use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::candidates::handlers as candidates;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/jobs/",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        // Candidates
        .route("/api/candidates", post(candidates::handle_create_candidate))
        .route("/api/candidates/", post(candidates::handle_create_candidate))
        .route(
            "/api/candidates/job/:job_id",
            get(candidates::handle_list_candidates_for_job),
        )
        .route(
            "/api/candidates/:id",
            get(candidates::handle_get_candidate)
                .patch(candidates::handle_update_candidate)
                .delete(candidates::handle_delete_candidate),
        )
        // Analysis
        .route("/api/analysis/analyze", post(analysis::handle_analyze))
        .route(
            "/api/analysis/batch-analyze/:job_id",
            post(analysis::handle_batch_analyze),
        )
        .route(
            "/api/analysis/parse-profile",
            post(analysis::handle_parse_profile),
        )
        .with_state(state)
}
