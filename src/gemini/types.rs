//! Wire model of the `generateContent` REST call. Field names follow the
//! camelCase / SCREAMING_SNAKE conventions of the remote API.

use serde::{Deserialize, Serialize};

use super::error::ModelError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str, generation: &GenerationConfig) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: generation.clone(),
            safety_settings: SafetySetting::default_set(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Decoding parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// Every category the API filters on, blocking medium and above.
    pub fn default_set() -> Vec<SafetySetting> {
        [
            HarmCategory::Harassment,
            HarmCategory::HateSpeech,
            HarmCategory::SexuallyExplicit,
            HarmCategory::DangerousContent,
        ]
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

// Full threshold set accepted by the API; only one is used here.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Review text of the first candidate, parts concatenated. A blocked or
    /// empty answer is an error, never an empty success.
    pub fn into_review_text(self) -> Result<String, ModelError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return match self.prompt_feedback.and_then(|fb| fb.block_reason) {
                Some(reason) => Err(ModelError::Blocked(reason)),
                None => Err(ModelError::Empty),
            };
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            // a candidate stopped by the safety filters carries a reason
            // instead of content
            return match candidate.finish_reason {
                Some(reason) if reason != "STOP" => Err(ModelError::Blocked(reason)),
                _ => Err(ModelError::Empty),
            };
        }

        Ok(text)
    }
}

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.top_k, 32);
        assert_eq!(config.max_output_tokens, 2048);
    }

    #[test]
    fn request_wire_format() {
        let request =
            GenerateContentRequest::from_prompt("review this", &GenerationConfig::default());
        let wire = serde_json::to_value(&request).unwrap();

        assert_eq!(wire["contents"][0]["role"], "user");
        assert_eq!(wire["contents"][0]["parts"][0]["text"], "review this");
        assert_eq!(wire["generationConfig"]["temperature"], 0.7);
        assert_eq!(wire["generationConfig"]["topP"], 1.0);
        assert_eq!(wire["generationConfig"]["topK"], 32);
        assert_eq!(wire["generationConfig"]["maxOutputTokens"], 2048);

        let settings = wire["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        for setting in settings {
            assert_eq!(setting["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
        }
        let categories: Vec<&str> = settings
            .iter()
            .map(|s| s["category"].as_str().unwrap())
            .collect();
        assert!(categories.contains(&"HARM_CATEGORY_HARASSMENT"));
        assert!(categories.contains(&"HARM_CATEGORY_HATE_SPEECH"));
        assert!(categories.contains(&"HARM_CATEGORY_SEXUALLY_EXPLICIT"));
        assert!(categories.contains(&"HARM_CATEGORY_DANGEROUS_CONTENT"));
    }

    #[test]
    fn response_text_concatenates_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Looks "}, {"text": "good."}]
                },
                "finishReason": "STOP"
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.into_review_text().unwrap(), "Looks good.");
    }

    #[test]
    fn missing_candidates_is_an_error() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(
            response.into_review_text(),
            Err(ModelError::Empty)
        ));
    }

    #[test]
    fn blocked_prompt_surfaces_reason() {
        let raw = serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        match response.into_review_text() {
            Err(ModelError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn stopped_candidate_without_text_surfaces_reason() {
        let raw = serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        match response.into_review_text() {
            Err(ModelError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidate_is_an_error() {
        let raw = serde_json::json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "STOP"}]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert!(matches!(
            response.into_review_text(),
            Err(ModelError::Empty)
        ));
    }
}
