use std::time::Duration;

use serde::Deserialize;

use crate::advisory::{AdvisoryError, AdvisoryGenerator, Prompt};
use crate::config::AdvisoryConfig;

/// Chat-completions client for the advisory text.
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    /// Missing keys surface as an [`AdvisoryError`] per request, not at startup.
    api_key: Option<String>,
    api_key_env: String,
}

impl OpenAiClient {
    pub fn from_config(config: &AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
        })
    }

    fn request_body(&self, prompt: &Prompt) -> serde_json::Value {
        let mut messages: Vec<serde_json::Value> = prompt
            .system
            .iter()
            .map(|s| serde_json::json!({"role": "system", "content": s}))
            .collect();
        messages.push(serde_json::json!({"role": "user", "content": &prompt.user}));

        serde_json::json!({
            "model": &self.model,
            "messages": messages,
        })
    }
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// First non-blank message content, trimmed.
fn reply_text(response: ChatResponse) -> Result<String, AdvisoryError> {
    response
        .choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty())
        .ok_or(AdvisoryError::EmptyResponse)
}

impl AdvisoryGenerator for OpenAiClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisoryError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AdvisoryError::MissingApiKey(self.api_key_env.clone()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("User-Agent", concat!("rent-risk/", env!("CARGO_PKG_VERSION")))
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisoryError::Status { status, body });
        }

        let data: ChatResponse = response.json().await?;
        reply_text(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> OpenAiClient {
        OpenAiClient {
            client: reqwest::Client::new(),
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: api_key.map(str::to_string),
            api_key_env: "RENT_RISK_TEST_KEY".to_string(),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let prompt = Prompt {
            system: vec!["role".to_string(), "task".to_string()],
            user: "listing".to_string(),
        };
        let body = client(Some("k")).request_body(&prompt);

        assert_eq!(body["model"], "gpt-3.5-turbo");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[2]["role"], "user");
        assert_eq!(messages[2]["content"], "listing");
    }

    #[test]
    fn test_reply_text_parsing() {
        let data: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  전세가율이 높습니다.  "}}]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(data).unwrap(), "전세가율이 높습니다.");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(reply_text(empty), Err(AdvisoryError::EmptyResponse)));

        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(reply_text(blank), Err(AdvisoryError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let prompt = Prompt {
            system: vec![],
            user: "x".to_string(),
        };
        let err = client(None).generate(&prompt).await.unwrap_err();
        assert!(matches!(err, AdvisoryError::MissingApiKey(ref var) if var == "RENT_RISK_TEST_KEY"));
        assert_eq!(err.to_string(), "API key not set (expected in $RENT_RISK_TEST_KEY)");
    }
}
