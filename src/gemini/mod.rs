use async_trait::async_trait;

pub mod client;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use error::ModelError;

use self::types::GenerationConfig;

/// A remote model that turns a review prompt into review text.
///
/// The decoding configuration is threaded through every call rather than
/// held as shared state, so a request carries exactly what it was built with.
#[async_trait]
pub trait ReviewModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String, ModelError>;
}
