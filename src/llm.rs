//! LLM Client
//!
//! Chat-completion client for an Ollama server. Whatever shape the server
//! answers with is normalised here, so callers only ever see plain text.

use crate::config::LlmConfig;
use crate::error::{QaError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A language model that turns a prompt into plain text.
///
/// Calls block the turn until the model answers; there is no timeout and
/// no retry.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.model.clone(), config.base_url.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        debug!("Calling {} with {} messages", self.model, messages.len());

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| QaError::Llm(format!("LLM API call failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QaError::Llm(format!("LLM API error ({}): {}", status, error_text)));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| QaError::Llm(format!("Failed to parse LLM response: {}", e)))?;

        Ok(response_text(&response_json))
    }
}

/// Extract the reply text from a chat or generate style payload
pub fn response_text(payload: &serde_json::Value) -> String {
    if let Some(content) = payload
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
    {
        return content.trim().to_string();
    }

    if let Some(text) = payload.get("response").and_then(|r| r.as_str()) {
        return text.trim().to_string();
    }

    error!("Unexpected LLM response shape: {}", payload);
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_payload() {
        let payload = json!({
            "model": "llama3:latest",
            "message": {"role": "assistant", "content": "  SELECT 1;\n"},
            "done": true
        });
        assert_eq!(response_text(&payload), "SELECT 1;");
    }

    #[test]
    fn test_generate_payload() {
        let payload = json!({"model": "llama3:latest", "response": "There are 42 students. ", "done": true});
        assert_eq!(response_text(&payload), "There are 42 students.");
    }

    #[test]
    fn test_unexpected_payload_is_stringified() {
        let payload = json!({"choices": []});
        assert_eq!(response_text(&payload), r#"{"choices":[]}"#);
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        let msg = ChatMessage::system("schema");
        assert_eq!(serde_json::to_value(&msg).unwrap(), json!({"role": "system", "content": "schema"}));
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let client = LlmClient::new("llama3:latest".to_string(), "http://localhost:11434/".to_string());
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.model(), "llama3:latest");
    }
}
