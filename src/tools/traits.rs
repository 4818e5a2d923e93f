//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::ToolError;
use super::context::ToolContext;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the model's function call name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn parameters(&self) -> Value;

    /// Execute the tool
    ///
    /// Expected failures (sandbox violations, missing files, timeouts) come
    /// back as `Ok` with an error result so the model can see them. An `Err`
    /// is reserved for failures the tool did not anticipate; the dispatcher
    /// converts those to text at its boundary.
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError>;
}

/// Result of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: Value,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result with text content
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: Value::String(content.into()),
            is_error: false,
        }
    }

    /// Create a successful result with structured content
    pub fn structured(content: Value) -> Self {
        debug!("ToolResult::structured: called");
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: Value::String(content.into()),
            is_error: true,
        }
    }
}
