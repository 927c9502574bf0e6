use sqlx::SqlitePool;

use crate::llm_client::AiGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Built once at startup; unconfigured when no API key is set.
    pub ai: AiGateway,
}
