use async_trait::async_trait;
use hydro_core::Result;
use serde::{Deserialize, Serialize};

/// A single completion request to a generation provider.
///
/// The schedule pipeline makes one plain prompt-in / text-out call per run:
/// no conversation history, no streaming, no tool-use protocol.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The model to use, e.g. "claude-sonnet-4-20250514".
    pub model: String,
    /// The user prompt.
    pub prompt: String,
    /// System prompt (separate from the prompt for providers that support it).
    pub system: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature.
    pub temperature: f32,
}

/// A complete response from a generation provider.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// The generated text.
    pub text: String,
    pub usage: Usage,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Trait implemented by each generation provider (Anthropic, mock, etc.)
///
/// The pipeline treats implementations as opaque collaborators: given a
/// well-formed prompt they should return text, and any timeout they enforce
/// surfaces as [`hydro_core::HydroError::CollaboratorUnavailable`].
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Human-readable name, e.g. "anthropic", "mock".
    fn name(&self) -> &str;

    /// Send a single non-streaming completion request.
    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResponse>;

    /// Check if this provider is healthy / reachable.
    async fn health_check(&self) -> Result<()>;
}
