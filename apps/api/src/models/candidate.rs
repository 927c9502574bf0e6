use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;

use super::{check_optional, check_required};
use crate::errors::AppError;

pub const DEFAULT_SOURCE: &str = "manual";
pub const INITIAL_STATUS: &str = "new";

/// A sourced candidate, owned by exactly one job.
/// `match_score`, `analysis`, `strengths` and `concerns` are written only by analysis.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub job_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub profile_data: Option<Json<Value>>,
    pub experience: Option<Json<Vec<Value>>>,
    pub education: Option<Json<Vec<Value>>>,
    pub skills: Option<Json<Vec<String>>>,
    pub match_score: Option<f64>,
    pub analysis: Option<Json<Value>>,
    pub strengths: Option<Json<Vec<String>>>,
    pub concerns: Option<Json<Vec<String>>>,
    pub source: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

/// Body of `POST /api/candidates`.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateCreate {
    pub job_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub profile_data: Option<Map<String, Value>>,
    pub experience: Option<Vec<Map<String, Value>>>,
    pub education: Option<Vec<Map<String, Value>>>,
    pub skills: Option<Vec<String>>,
    #[serde(default = "default_source")]
    pub source: String,
}

impl CandidateCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        check_required("name", &self.name, 255)?;
        check_optional("email", self.email.as_deref(), 255)?;
        check_optional("linkedin_url", self.linkedin_url.as_deref(), 500)?;
        check_optional("current_title", self.current_title.as_deref(), 255)?;
        check_optional("current_company", self.current_company.as_deref(), 255)?;
        check_optional("location", self.location.as_deref(), 255)?;
        check_required("source", &self.source, 100)
    }
}

/// Body of `PATCH /api/candidates/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateUpdate {
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl CandidateUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(status) = &self.status {
            check_required("status", status, 50)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none()
    }
}

/// Normalized result of one candidate analysis, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateAnalysis {
    pub match_score: f64,
    pub analysis: Value,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
}
