use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use super::{strip_json_fences, LlmBackend, LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("AI service not configured")]
    NotConfigured,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Model reply was JSON but not an object")]
    NotAnObject,
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Llm(LlmError::Parse(err))
    }
}

/// Handle to the hosted model, constructed once at startup and passed
/// through `AppState`. Holds no backend when no API key is configured.
#[derive(Clone, Default)]
pub struct AiGateway {
    backend: Option<Arc<dyn LlmBackend>>,
}

impl AiGateway {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Builds the Anthropic-backed gateway, or an unconfigured one without a key.
    pub fn from_api_key(api_key: Option<String>) -> Result<Self, LlmError> {
        match api_key {
            Some(key) => Ok(Self::new(Arc::new(LlmClient::new(key)?))),
            None => Ok(Self::unconfigured()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Sends the prompt and parses the reply as a JSON object.
    /// Markdown code fences around the reply are tolerated.
    pub async fn call_json_object(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
    ) -> Result<Map<String, Value>, GatewayError> {
        let backend = self.backend.as_ref().ok_or(GatewayError::NotConfigured)?;
        let reply = backend.complete(prompt, system, max_tokens).await?;

        match serde_json::from_str::<Value>(strip_json_fences(&reply))? {
            Value::Object(map) => Ok(map),
            _ => Err(GatewayError::NotAnObject),
        }
    }
}

/// Canned-reply backends shared by the tests of every feature module.
#[cfg(test)]
pub mod fake {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Returns the reply of the first rule whose needle occurs in the prompt,
    /// or the default reply. Prompts are recorded for inspection.
    #[derive(Default)]
    pub struct FakeBackend {
        rules: Vec<(String, Result<String, String>)>,
        default_reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        pub fn replying(reply: &str) -> Self {
            Self {
                default_reply: Some(reply.to_string()),
                ..Self::default()
            }
        }

        pub fn reply_when(mut self, needle: &str, reply: &str) -> Self {
            self.rules.push((needle.to_string(), Ok(reply.to_string())));
            self
        }

        pub fn fail_when(mut self, needle: &str, message: &str) -> Self {
            self.rules.push((needle.to_string(), Err(message.to_string())));
            self
        }

        pub fn into_gateway(self) -> AiGateway {
            AiGateway::new(Arc::new(self))
        }
    }

    #[async_trait]
    impl LlmBackend for FakeBackend {
        async fn complete(
            &self,
            prompt: &str,
            _system: &str,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());

            let outcome = self
                .rules
                .iter()
                .find(|(needle, _)| prompt.contains(needle.as_str()))
                .map(|(_, outcome)| outcome.clone())
                .or_else(|| self.default_reply.clone().map(Ok))
                .unwrap_or_else(|| Err("no canned reply".to_string()));

            outcome.map_err(|message| LlmError::Api {
                status: 500,
                message,
            })
        }
    }
}
