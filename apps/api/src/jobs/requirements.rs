//! Requirement extraction: turns a free-text job description into a
//! structured requirements object via the model.
//!
//! Failures never block job creation. They are embedded in the returned
//! object as `{"error": "<message>"}` instead.

use serde_json::{json, Value};
use tracing::warn;

use crate::jobs::prompts::{REQUIREMENTS_MAX_TOKENS, REQUIREMENTS_PROMPT};
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::AiGateway;

pub async fn extract_job_requirements(description: &str, ai: &AiGateway) -> Value {
    let prompt = render(REQUIREMENTS_PROMPT, &[("description", description)]);

    match ai
        .call_json_object(&prompt, JSON_ONLY_SYSTEM, REQUIREMENTS_MAX_TOKENS)
        .await
    {
        Ok(requirements) => Value::Object(requirements),
        Err(e) => {
            warn!("Requirement extraction degraded: {e}");
            json!({ "error": e.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeBackend;

    #[tokio::test]
    async fn test_unconfigured_gateway_yields_sentinel() {
        let requirements = extract_job_requirements("Rust engineer", &AiGateway::unconfigured()).await;
        assert_eq!(requirements, json!({"error": "AI service not configured"}));
    }

    #[tokio::test]
    async fn test_reply_is_returned_as_object() {
        let reply = r#"{
            "required_skills": ["Rust", "SQL"],
            "preferred_skills": ["Kubernetes"],
            "min_years_experience": 5,
            "education_requirements": [],
            "key_responsibilities": ["Own ingestion"],
            "must_have_qualifications": ["Production Rust"]
        }"#;
        let backend = FakeBackend::replying(reply);
        let ai = backend.into_gateway();

        let requirements = extract_job_requirements("Senior Rust engineer, 5+ years", &ai).await;
        assert_eq!(requirements["required_skills"], json!(["Rust", "SQL"]));
        assert_eq!(requirements["min_years_experience"], json!(5));
    }

    #[tokio::test]
    async fn test_description_is_embedded_in_prompt() {
        let backend = std::sync::Arc::new(FakeBackend::replying("{}"));
        let ai = AiGateway::new(backend.clone());

        extract_job_requirements("Maintain the billing ledger", &ai).await;

        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Job Description:\nMaintain the billing ledger"));
        assert!(!prompts[0].contains("{description}"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_embedded_as_error() {
        let ai = FakeBackend::replying("I could not find any requirements.").into_gateway();
        let requirements = extract_job_requirements("???", &ai).await;

        let message = requirements["error"].as_str().unwrap();
        assert!(message.starts_with("JSON parse error"), "got {message}");
    }

    #[tokio::test]
    async fn test_model_failure_is_embedded_as_error() {
        let ai = FakeBackend::default()
            .fail_when("Job Description", "overloaded")
            .into_gateway();
        let requirements = extract_job_requirements("Data engineer", &ai).await;

        assert!(requirements["error"].as_str().unwrap().contains("overloaded"));
    }
}
