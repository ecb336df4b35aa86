//! Scripted models for tests: no network, every call recorded.

use std::sync::Mutex;

use async_trait::async_trait;

use super::error::ModelError;
use super::types::GenerationConfig;
use super::ReviewModel;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub generation: GenerationConfig,
}

/// Returns a fixed reply and records every request it receives.
#[derive(Debug, Default)]
pub struct ReplayModel {
    reply: String,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ReplayModel {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

#[async_trait]
impl ReviewModel for ReplayModel {
    async fn generate(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, ModelError> {
        self.calls.lock().expect("call log poisoned").push(RecordedCall {
            prompt: prompt.to_string(),
            generation: generation.clone(),
        });
        Ok(self.reply.clone())
    }
}

/// Always fails with the given message.
#[derive(Debug)]
pub struct FailingModel {
    message: String,
}

impl FailingModel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ReviewModel for FailingModel {
    async fn generate(
        &self,
        _prompt: &str,
        _generation: &GenerationConfig,
    ) -> Result<String, ModelError> {
        Err(ModelError::Http(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replay_model_records_calls() {
        let model = ReplayModel::with_reply("fine");
        let out = model
            .generate("prompt body", &GenerationConfig::default())
            .await
            .unwrap();
        assert_eq!(out, "fine");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "prompt body");
        assert_eq!(calls[0].generation, GenerationConfig::default());
    }

    #[tokio::test]
    async fn failing_model_errors() {
        let model = FailingModel::new("service unavailable");
        let result = model.generate("x", &GenerationConfig::default()).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("service unavailable"));
    }
}
