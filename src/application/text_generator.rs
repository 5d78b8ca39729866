// Trait for the external generative text service
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request to generative service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generative service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode generative service response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether an access credential is configured. Calls are never
    /// attempted without one.
    fn has_credentials(&self) -> bool;

    /// Generate text for a single prompt. May return an empty string.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}
