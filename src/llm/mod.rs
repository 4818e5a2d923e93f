//! LLM client module for CodeAgent
//!
//! Provides the client seam the conversation loop talks to and the Gemini
//! implementation behind it.

mod client;
mod error;
mod gemini;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{
    CompletionRequest, CompletionResponse, FunctionCall, FunctionResponse, Message, Part, Role, TokenUsage,
    ToolDefinition,
};

#[cfg(test)]
pub use client::mock;
