//! LLM request/response types for CodeAgent
//!
//! These types model the Gemini generateContent API: a conversation is a
//! sequence of role-tagged messages whose parts are text, function calls,
//! or function responses.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Fixed system instruction describing the agent's allowed operations
    pub system_prompt: String,

    /// Full conversation history
    pub messages: Vec<Message>,

    /// Available tool declarations
    pub tools: Vec<ToolDefinition>,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Create a model message with the given parts
    pub fn model(parts: Vec<Part>) -> Self {
        debug!(part_count = %parts.len(), "Message::model: called");
        Self { role: Role::Model, parts }
    }

    /// Create a tool message carrying a single function response
    pub fn tool(part: Part) -> Self {
        debug!("Message::tool: called");
        Self {
            role: Role::Tool,
            parts: vec![part],
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    Tool,
}

/// A content part in a message
///
/// Externally tagged so each part serializes to the single-key object the
/// Gemini wire format uses: `{"text": ...}`, `{"functionCall": ...}` or
/// `{"functionResponse": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Part {
    #[serde(rename = "text")]
    Text(String),

    #[serde(rename = "functionCall")]
    FunctionCall(FunctionCall),

    #[serde(rename = "functionResponse")]
    FunctionResponse(FunctionResponse),
}

impl Part {
    /// Create a function response part
    pub fn function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        Part::FunctionResponse(FunctionResponse {
            name: name.into(),
            response,
        })
    }
}

/// A tool call requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,

    #[serde(default)]
    pub args: serde_json::Value,
}

/// The envelope a dispatched tool call produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: serde_json::Value,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The first candidate's message, to be appended to history
    pub message: Message,

    /// Token usage for this round
    pub usage: TokenUsage,
}

/// Per-round token usage reported by the service
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub response_tokens: u64,
}

/// Tool declaration exposed to the model
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: serde_json::Value) -> Self {
        let name = name.into();
        let description = description.into();
        debug!(%name, "ToolDefinition::new: called");
        Self {
            name,
            description,
            parameters,
        }
    }
}
