use reqwest::Client;
use serde::Deserialize;

use crate::Generator;

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenAIError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Completion response contained no message content")]
    EmptyResponse,
}

impl OpenAIClient {
    const SYSTEM_PROMPT: &'static str = include_str!("./prompts/system_0.txt");
    const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.into(),
            model: <Self as Generator>::GENERATOR_MODEL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[tracing::instrument(skip(self, user_content), fields(model = %self.model))]
    pub async fn send_completion_request(
        &self,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, OpenAIError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0.2,
            "messages": [
                {
                    "role": "system",
                    "content": Self::SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(OpenAIError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice, if the model produced any.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

impl Generator for OpenAIClient {
    const GENERATOR_MODEL: &'static str = "gpt-4o-mini";
    type Error = OpenAIError;

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let response = self.send_completion_request(prompt).await?;

        response.into_content().ok_or(OpenAIError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_content_is_first_choice() {
        let response: CompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "{\"summary\": \"ok\"}"},
                    "finish_reason": "stop"
                }
            ]
        }))
        .unwrap();

        assert_eq!(
            response.into_content().as_deref(),
            Some("{\"summary\": \"ok\"}")
        );
    }

    #[test]
    fn test_blank_completion_has_no_content() {
        let response: CompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-2",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  "}, "finish_reason": null}
            ]
        }))
        .unwrap();

        assert!(response.into_content().is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OpenAIClient::new("key")
            .with_base_url("http://localhost:8080/v1/")
            .with_model("llama3");
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.model(), "llama3");
    }
}
