use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::{build_messages, SenseiProvider};
use crate::config::ChatConfig;

/// Client for an OpenAI-compatible `chat/completions` endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(api_key: String, config: &ChatConfig) -> Self {
        info!(model = %config.model, base_url = %config.api_base, "creating sensei provider");
        Self {
            client: Client::new(),
            api_key,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// Request body for one exchange.
    pub fn request_body(&self, topic: &str, message: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": build_messages(topic, message),
            "max_tokens": self.max_tokens,
        })
    }
}

/// Pull `choices[0].message.content` out of a completion response.
pub fn parse_completion(response: &serde_json::Value) -> Result<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("invalid response format: missing content"))
}

#[async_trait]
impl SenseiProvider for OpenAiProvider {
    async fn reply(&self, topic: &str, message: &str) -> Result<String> {
        let request = self.request_body(topic, message);
        info!(model = %self.model, topic, "sending message to sensei");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("sensei request failed")?
            .error_for_status()
            .context("sensei returned an error status")?
            .json::<serde_json::Value>()
            .await
            .context("failed to read sensei response")?;

        let content = parse_completion(&response)?;
        info!(chars = content.chars().count(), "received sensei response");
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new("sk-test".into(), &ChatConfig::default())
    }

    #[test]
    fn request_body_carries_model_and_limit() {
        let body = provider().request_body("food", "What is cucumber?");
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 150);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "What is cucumber?");
    }

    #[test]
    fn trailing_slash_in_base_url_is_dropped() {
        let config = ChatConfig {
            api_base: "http://localhost:8080/v1/".into(),
            ..ChatConfig::default()
        };
        let p = OpenAiProvider::new("k".into(), &config);
        assert_eq!(p.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn parse_completion_reads_first_choice() {
        let response = serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": "きゅうり (kyuuri) - cucumber"}
            }]
        });
        assert_eq!(
            parse_completion(&response).unwrap(),
            "きゅうり (kyuuri) - cucumber"
        );
    }

    #[test]
    fn parse_completion_rejects_missing_content() {
        let response = serde_json::json!({"error": {"message": "quota exceeded"}});
        assert!(parse_completion(&response).is_err());
    }
}
