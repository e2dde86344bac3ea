//! # hydro-llm
//!
//! Abstraction layer over the generation collaborator: the external
//! text-generation service the schedule pipeline calls exactly once per run.
//! Ships an Anthropic adapter for production and a mock for deterministic tests.

pub mod anthropic;
pub mod mock;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use provider::{GenerationProvider, GenerationRequest, GenerationResponse, Usage};
