use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::AppConfig;

use super::error::ModelError;
use super::types::{
    ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use super::ReviewModel;

/// reqwest-backed client for the hosted `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ReviewModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, ModelError> {
        let request = GenerateContentRequest::from_prompt(prompt, generation);

        debug!(model = %self.model, prompt_chars = prompt.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(self.timeout_secs)
                } else {
                    ModelError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "generateContent returned error");
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        parsed.into_review_text()
    }
}

/// Pull the human-readable message out of the API error envelope, falling
/// back to the raw body when it is not the expected JSON.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
