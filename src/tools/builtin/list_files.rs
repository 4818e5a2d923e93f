//! list_files tool - list directory entries with size and type

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// List the immediate entries of a directory in the sandbox
pub struct ListFilesTool;

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        "List files in a directory along with their sizes and whether they are directories"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "The directory to list, relative to the working directory (defaults to the working directory itself)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        debug!(?input, "ListFilesTool::execute: called");
        let directory = input["directory"].as_str().unwrap_or(".");
        debug!(%directory, "ListFilesTool::execute: directory parameter");

        let full_path = match ctx.validate_path(Path::new(directory)) {
            Ok(p) => {
                debug!(?p, "ListFilesTool::execute: path validated");
                p
            }
            Err(e) => {
                debug!(%e, "ListFilesTool::execute: path validation failed");
                return Ok(ToolResult::error(e.to_string()));
            }
        };

        let mut dir = match tokio::fs::read_dir(&full_path).await {
            Ok(d) => d,
            Err(e) => {
                debug!(%e, "ListFilesTool::execute: failed to read directory");
                return Ok(ToolResult::error(format!("Failed to read directory: {}", e)));
            }
        };

        let mut entries = Vec::new();
        while let Ok(Some(entry)) = dir.next_entry().await {
            let name = entry.file_name().to_string_lossy().to_string();
            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(_) => {
                    debug!(%name, "ListFilesTool::execute: failed to get metadata, skipping entry");
                    continue;
                }
            };

            entries.push(format!(
                "- {}: file_size={} bytes, is_dir={}",
                name,
                metadata.len(),
                metadata.is_dir()
            ));
        }

        entries.sort();
        debug!(entries_count = %entries.len(), "ListFilesTool::execute: entries collected");

        if entries.is_empty() {
            Ok(ToolResult::success("(empty directory)"))
        } else {
            Ok(ToolResult::success(entries.join("\n")))
        }
    }
}
