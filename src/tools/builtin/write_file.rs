//! write_file tool - write or overwrite a file

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Write content to a file, creating parent directories as needed
pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn description(&self) -> &'static str {
        "Write or overwrite a file with given content"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to the file, relative to the working directory"
                },
                "content": {
                    "type": "string",
                    "description": "The text content to write into the file"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        debug!(?input, "WriteFileTool::execute: called");
        let file_path = match input["file_path"].as_str() {
            Some(p) => {
                debug!(%p, "WriteFileTool::execute: file_path parameter found");
                p
            }
            None => {
                debug!("WriteFileTool::execute: missing file_path parameter");
                return Ok(ToolResult::error("file_path is required"));
            }
        };

        let content = match input["content"].as_str() {
            Some(c) => {
                debug!(content_len = %c.len(), "WriteFileTool::execute: content parameter found");
                c
            }
            None => {
                debug!("WriteFileTool::execute: missing content parameter");
                return Ok(ToolResult::error("content is required"));
            }
        };

        let full_path = match ctx.validate_path(Path::new(file_path)) {
            Ok(p) => {
                debug!(?p, "WriteFileTool::execute: path validated");
                p
            }
            Err(e) => {
                debug!(%e, "WriteFileTool::execute: path validation failed");
                return Ok(ToolResult::error(e.to_string()));
            }
        };

        if let Some(parent) = full_path.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            debug!(%e, "WriteFileTool::execute: failed to create parent directories");
            return Ok(ToolResult::error(format!("Failed to create directories: {}", e)));
        }

        if let Err(e) = tokio::fs::write(&full_path, content).await {
            debug!(%e, "WriteFileTool::execute: failed to write file");
            return Ok(ToolResult::error(format!("Failed to write file: {}", e)));
        }

        let chars = content.chars().count();
        debug!(%chars, "WriteFileTool::execute: file written successfully");
        Ok(ToolResult::success(format!(
            "Successfully wrote to \"{}\" ({} characters written)",
            file_path, chars
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_file_basic() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = WriteFileTool;

        let result = tool
            .execute(
                serde_json::json!({
                    "file_path": "test.txt",
                    "content": "Hello, world!"
                }),
                &ctx,
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(
            result.content.as_str().unwrap(),
            "Successfully wrote to \"test.txt\" (13 characters written)"
        );

        let content = fs::read_to_string(temp.path().join("test.txt")).unwrap();
        assert_eq!(content, "Hello, world!");
    }

    #[tokio::test]
    async fn test_write_file_creates_directories() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = WriteFileTool;

        let result = tool
            .execute(
                serde_json::json!({
                    "file_path": "nested/dir/test.txt",
                    "content": "content"
                }),
                &ctx,
            )
            .await
            .unwrap();

        assert!(!result.is_error);

        let content = fs::read_to_string(temp.path().join("nested/dir/test.txt")).unwrap();
        assert_eq!(content, "content");
    }

    #[tokio::test]
    async fn test_write_file_overwrites_existing() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("test.txt");
        fs::write(&file_path, "old content").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = WriteFileTool;

        let result = tool
            .execute(
                serde_json::json!({
                    "file_path": "test.txt",
                    "content": "new content"
                }),
                &ctx,
            )
            .await
            .unwrap();

        assert!(!result.is_error);

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());

        let written = "round trip content\nwith a second line";
        let write_result = WriteFileTool
            .execute(
                serde_json::json!({"file_path": "sub/roundtrip.txt", "content": written}),
                &ctx,
            )
            .await
            .unwrap();
        assert!(!write_result.is_error);

        let read_result = super::super::ReadFileTool
            .execute(serde_json::json!({"file_path": "sub/roundtrip.txt"}), &ctx)
            .await
            .unwrap();
        assert!(!read_result.is_error);
        assert_eq!(read_result.content.as_str().unwrap(), written);
    }

    #[tokio::test]
    async fn test_write_file_missing_content() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = WriteFileTool;

        let result = tool
            .execute(serde_json::json!({"file_path": "test.txt"}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.as_str().unwrap().contains("content is required"));
    }

    #[tokio::test]
    async fn test_write_file_traversal_rejected_no_io() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = WriteFileTool;

        let result = tool
            .execute(
                serde_json::json!({
                    "file_path": "../escape.txt",
                    "content": "should not land"
                }),
                &ctx,
            )
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(
            result
                .content
                .as_str()
                .unwrap()
                .contains("outside the permitted working directory")
        );
        assert!(!temp.path().parent().unwrap().join("escape.txt").exists());
    }
}
