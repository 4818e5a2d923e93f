//! read_file tool - read file contents with a size cap

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Maximum number of characters returned to the model
const MAX_CHARS: usize = 10_000;

/// Read a file's contents, truncated at the cap
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Read and return the contents of a file"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The file path to read, relative to the working directory"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let file_path = match input["file_path"].as_str() {
            Some(p) => p,
            None => return Ok(ToolResult::error("file_path is required")),
        };

        let full_path = match ctx.validate_path(Path::new(file_path)) {
            Ok(p) => p,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        let is_file = tokio::fs::metadata(&full_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Ok(ToolResult::error(format!(
                "File not found or is not a regular file: \"{}\"",
                file_path
            )));
        }

        let content = match tokio::fs::read_to_string(&full_path).await {
            Ok(c) => c,
            Err(e) => return Ok(ToolResult::error(format!("Failed to read file: {}", e))),
        };

        if content.chars().count() > MAX_CHARS {
            let truncated: String = content.chars().take(MAX_CHARS).collect();
            return Ok(ToolResult::success(format!(
                "{}[...File \"{}\" truncated at {} characters]",
                truncated, file_path, MAX_CHARS
            )));
        }

        Ok(ToolResult::success(content))
    }
}
