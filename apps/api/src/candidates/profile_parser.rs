//! Profile parser: turns raw LinkedIn profile text or HTML into the
//! structured shape used by candidate records.

use serde_json::{json, Value};
use tracing::warn;

use crate::candidates::prompts::{PROFILE_INPUT_LIMIT, PROFILE_MAX_TOKENS, PROFILE_PARSE_PROMPT};
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::AiGateway;

/// Parses a raw profile. Like requirement extraction, failures come back as
/// `{"error": "<message>"}` rather than an `Err`.
pub async fn parse_linkedin_profile(profile_text: &str, ai: &AiGateway) -> Value {
    let prompt = render(
        PROFILE_PARSE_PROMPT,
        &[("profile_text", truncate_chars(profile_text, PROFILE_INPUT_LIMIT))],
    );

    match ai
        .call_json_object(&prompt, JSON_ONLY_SYSTEM, PROFILE_MAX_TOKENS)
        .await
    {
        Ok(profile) => Value::Object(profile),
        Err(e) => {
            warn!("Profile parsing failed: {e}");
            json!({ "error": e.to_string() })
        }
    }
}

/// Longest prefix of at most `max` characters, cut on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::fake::FakeBackend;

    #[test]
    fn test_truncate_chars_respects_multibyte_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[tokio::test]
    async fn test_long_profile_is_truncated_before_sending() {
        let backend = Arc::new(FakeBackend::replying(r#"{"name": "Ada Lovelace"}"#));
        let ai = AiGateway::new(backend.clone());
        let profile = format!("{}{}", "a".repeat(PROFILE_INPUT_LIMIT), "TAIL_MARKER");

        let parsed = parse_linkedin_profile(&profile, &ai).await;

        assert_eq!(parsed["name"], json!("Ada Lovelace"));
        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].contains(&"a".repeat(PROFILE_INPUT_LIMIT)));
        assert!(!prompts[0].contains("TAIL_MARKER"));
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_yields_error_payload() {
        let parsed = parse_linkedin_profile("Ada Lovelace", &AiGateway::unconfigured()).await;
        assert_eq!(parsed, json!({"error": "AI service not configured"}));
    }
}
