//! Candidate analyzer: scores one candidate against their job via the model.
//!
//! Unlike requirement extraction this is a hard-failing operation. An
//! unconfigured gateway, a failed call or an unparseable reply is returned
//! as an error and nothing is persisted.

use serde_json::{json, Map, Value};

use crate::analysis::prompts::{ANALYSIS_MAX_TOKENS, ANALYSIS_PROMPT};
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::{AiGateway, GatewayError};
use crate::models::candidate::{CandidateAnalysis, CandidateRow};
use crate::models::job::JobRow;

pub async fn analyze_candidate(
    candidate: &CandidateRow,
    job: &JobRow,
    ai: &AiGateway,
) -> Result<CandidateAnalysis, GatewayError> {
    let prompt = build_analysis_prompt(candidate, job);
    let reply = ai
        .call_json_object(&prompt, JSON_ONLY_SYSTEM, ANALYSIS_MAX_TOKENS)
        .await?;
    Ok(normalize_analysis(reply))
}

pub fn build_analysis_prompt(candidate: &CandidateRow, job: &JobRow) -> String {
    let requirements = match job.requirements.as_ref().map(|r| &r.0) {
        Some(value) if value.as_object().is_some_and(|map| !map.is_empty()) => pretty(value),
        _ => "Not extracted".to_string(),
    };
    let profile = pretty(&candidate_profile(candidate));

    render(
        ANALYSIS_PROMPT,
        &[
            ("job_title", job.title.as_str()),
            ("job_company", job.company.as_str()),
            ("job_description", job.description.as_str()),
            ("job_requirements", requirements.as_str()),
            ("candidate_profile", profile.as_str()),
        ],
    )
}

/// The candidate fields the model sees. Missing lists and objects are sent empty.
fn candidate_profile(candidate: &CandidateRow) -> Value {
    json!({
        "name": candidate.name,
        "current_title": candidate.current_title,
        "current_company": candidate.current_company,
        "location": candidate.location,
        "experience": candidate.experience.as_ref().map(|e| e.0.clone()).unwrap_or_default(),
        "education": candidate.education.as_ref().map(|e| e.0.clone()).unwrap_or_default(),
        "skills": candidate.skills.as_ref().map(|s| s.0.clone()).unwrap_or_default(),
        "profile_data": candidate
            .profile_data
            .as_ref()
            .map(|p| p.0.clone())
            .unwrap_or_else(|| json!({})),
    })
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Pulls the persisted fields out of the model's reply. A missing score
/// counts as 0 and scores are clamped to 0–100; missing lists are empty.
pub fn normalize_analysis(analysis: Map<String, Value>) -> CandidateAnalysis {
    let match_score = analysis
        .get("match_score")
        .and_then(score_of)
        .unwrap_or(0.0)
        .clamp(0.0, 100.0);

    CandidateAnalysis {
        match_score,
        strengths: string_list(analysis.get("strengths")),
        concerns: string_list(analysis.get("concerns")),
        analysis: Value::Object(analysis),
    }
}

fn score_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    }
    .filter(|score| score.is_finite())
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
