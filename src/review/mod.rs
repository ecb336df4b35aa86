use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::gemini::types::GenerationConfig;
use crate::gemini::ReviewModel;
use crate::prompts::build_review_prompt;

/// Prefix of the string shown in place of a review when the remote call fails.
pub const ERROR_PREFIX: &str = "⚠️ Error: ";

/// Builds the prompt, makes exactly one model call per review, and folds any
/// failure into a displayable error string. The UI stays up no matter what
/// the remote side does.
pub struct ReviewService {
    model: Arc<dyn ReviewModel>,
    generation: GenerationConfig,
}

impl ReviewService {
    pub fn new(model: Arc<dyn ReviewModel>, generation: GenerationConfig) -> Self {
        Self { model, generation }
    }

    /// Callers must reject blank snippets first; see the web handlers.
    pub async fn generate_code_review(&self, code: &str) -> String {
        let request_id = Uuid::new_v4().to_string();
        let prompt = build_review_prompt(code);
        let started = Instant::now();

        match self.model.generate(&prompt, &self.generation).await {
            Ok(text) => {
                info!(
                    %request_id,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    review_chars = text.len(),
                    "review completed"
                );
                text
            }
            Err(e) => {
                warn!(%request_id, error = %e, "review request failed");
                format!("{ERROR_PREFIX}{e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::mock::{FailingModel, ReplayModel};

    #[tokio::test]
    async fn makes_exactly_one_call_with_snippet_embedded() {
        let model = Arc::new(ReplayModel::with_reply("Looks solid."));
        let service = ReviewService::new(model.clone(), GenerationConfig::default());

        let code = "def add(a, b):\n    return a + b";
        let out = service.generate_code_review(code).await;
        assert_eq!(out, "Looks solid.");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains(code));
        assert_eq!(calls[0].generation, GenerationConfig::default());
    }

    #[tokio::test]
    async fn failure_becomes_error_string() {
        let model = Arc::new(FailingModel::new("API key not valid"));
        let service = ReviewService::new(model, GenerationConfig::default());

        let out = service.generate_code_review("print('hi')").await;
        assert!(out.starts_with(ERROR_PREFIX));
        assert!(out.contains("API key not valid"));
    }
}
