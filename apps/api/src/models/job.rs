use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use super::{check_optional, check_required};
use crate::errors::AppError;

/// A job posting. `requirements` is whatever object the extraction step
/// produced, including the `{"error": ...}` payload when it soft-failed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Option<Json<Value>>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_range: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/jobs`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobCreate {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_range: Option<String>,
}

impl JobCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        check_required("title", &self.title, 255)?;
        check_required("company", &self.company, 255)?;
        check_required("description", &self.description, usize::MAX)?;
        check_optional("location", self.location.as_deref(), 255)?;
        check_optional("job_type", self.job_type.as_deref(), 50)?;
        check_optional("salary_range", self.salary_range.as_deref(), 100)
    }
}
