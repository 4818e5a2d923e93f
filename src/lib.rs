//! CodeAgent - sandboxed LLM coding agent
//!
//! CodeAgent forwards a user prompt to the Gemini API configured with a
//! small set of callable tools (list directory, read file, write file, run
//! a Python script), executes the tool the model selects against a
//! sandboxed working directory, feeds results back to the model, and
//! repeats until the model produces a final answer or the round cap is
//! reached.
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and Gemini implementation
//! - [`tools`] - Tool system for sandboxed file/process operations
//! - [`agent`] - Conversation loop engine
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod tools;

// Re-export commonly used types
pub use agent::{AgentEngine, RunOutcome};
pub use config::{AgentConfig, Config, LlmConfig, SandboxConfig};
pub use llm::{CompletionRequest, CompletionResponse, FunctionCall, GeminiClient, LlmClient, LlmError, Message, Part, Role, TokenUsage, ToolDefinition};
pub use tools::{Tool, ToolContext, ToolError, ToolExecutor, ToolResult};
