//! run_script tool - execute a Python script with a hard timeout

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Default wall-clock limit for a script run
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Execute a Python file inside the sandbox
///
/// Only `.py` files are accepted; restricting the executable type bounds
/// the blast radius of arbitrary execution. A non-zero exit code is not an
/// error at this layer - it is reported in the result structure.
pub struct RunScriptTool {
    timeout: Duration,
}

impl RunScriptTool {
    /// Create a tool with a custom timeout (for tests)
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for RunScriptTool {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[async_trait]
impl Tool for RunScriptTool {
    fn name(&self) -> &'static str {
        "run_script"
    }

    fn description(&self) -> &'static str {
        "Execute a Python file with optional arguments"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The relative path to the Python file"
                },
                "args": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Optional command line arguments"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        debug!(?input, "RunScriptTool::execute: called");
        let file_path = match input["file_path"].as_str() {
            Some(p) => p,
            None => return Ok(ToolResult::error("file_path is required")),
        };

        let args = match parse_args(&input) {
            Ok(args) => args,
            Err(message) => return Ok(ToolResult::error(message)),
        };

        let full_path = match ctx.validate_path(Path::new(file_path)) {
            Ok(p) => p,
            Err(e) => {
                debug!(%e, "RunScriptTool::execute: path validation failed");
                return Ok(ToolResult::error(e.to_string()));
            }
        };

        if !full_path.exists() {
            debug!(%file_path, "RunScriptTool::execute: script not found");
            return Ok(ToolResult::error(format!("File \"{}\" not found", file_path)));
        }

        if full_path.extension().and_then(|e| e.to_str()) != Some("py") {
            debug!(%file_path, "RunScriptTool::execute: not a python file");
            return Ok(ToolResult::error(format!("\"{}\" is not a Python file", file_path)));
        }

        debug!(?full_path, timeout = ?self.timeout, "RunScriptTool::execute: spawning script");
        let child = match tokio::process::Command::new("python3")
            .arg(&full_path)
            .args(&args)
            .current_dir(&ctx.working_directory)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(c) => c,
            Err(e) => {
                debug!(%e, "RunScriptTool::execute: failed to launch script");
                return Ok(ToolResult::error(format!("Failed to execute script: {}", e)));
            }
        };

        // On timeout the output future is dropped, which kills the child
        // (kill_on_drop) - no orphan is left behind.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                debug!(status = ?output.status, "RunScriptTool::execute: script completed");
                output
            }
            Ok(Err(e)) => {
                debug!(%e, "RunScriptTool::execute: failed waiting for script");
                return Ok(ToolResult::error(format!("Failed to execute script: {}", e)));
            }
            Err(_) => {
                debug!("RunScriptTool::execute: script timed out");
                return Ok(ToolResult::error(format!(
                    "Execution of \"{}\" timed out after {} seconds",
                    file_path,
                    self.timeout.as_secs()
                )));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        Ok(ToolResult::structured(serde_json::json!({
            "stdout": stdout.trim(),
            "stderr": stderr.trim(),
            "exit_code": output.status.code().unwrap_or(-1),
        })))
    }
}

/// Parse the optional `args` parameter into a string vector
fn parse_args(input: &Value) -> Result<Vec<String>, String> {
    match input.get("args") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => {
            let mut args = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(s) => args.push(s.to_string()),
                    None => return Err("args must be an array of strings".to_string()),
                }
            }
            Ok(args)
        }
        Some(_) => Err("args must be an array of strings".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_run_script_basic() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("hello.py"), "print(\"hello from script\")").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "hello.py"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content["stdout"], "hello from script");
        assert_eq!(result.content["stderr"], "");
        assert_eq!(result.content["exit_code"], 0);
    }

    #[tokio::test]
    async fn test_run_script_passes_arguments() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("echo.py"), "import sys\nprint(sys.argv[1])").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(
                serde_json::json!({"file_path": "echo.py", "args": ["forwarded"]}),
                &ctx,
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content["stdout"], "forwarded");
    }

    #[tokio::test]
    async fn test_run_script_nonzero_exit_is_not_an_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("fail.py"), "import sys\nsys.exit(3)").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "fail.py"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content["exit_code"], 3);
    }

    #[tokio::test]
    async fn test_run_script_captures_stderr() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("warn.py"),
            "import sys\nprint(\"problem\", file=sys.stderr)",
        )
        .unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "warn.py"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content["stderr"], "problem");
    }

    #[tokio::test]
    async fn test_run_script_runs_in_working_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("cwd.py"), "import os\nprint(os.getcwd())").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "cwd.py"}), &ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        let reported = result.content["stdout"].as_str().unwrap();
        assert_eq!(reported, ctx.working_directory.to_str().unwrap());
    }

    #[tokio::test]
    async fn test_run_script_timeout() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("slow.py"), "import time\ntime.sleep(30)").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::with_timeout(Duration::from_millis(500));

        let result = tool
            .execute(serde_json::json!({"file_path": "slow.py"}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_run_script_wrong_extension_rejected() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("script.sh"), "echo hi").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "script.sh"}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.as_str().unwrap().contains("is not a Python file"));
    }

    #[tokio::test]
    async fn test_run_script_missing_file() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "missing.py"}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_run_script_traversal_rejected() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "../../usr/bin/evil.py"}), &ctx)
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
    }

    #[tokio::test]
    async fn test_run_script_bad_args_type() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("noop.py"), "").unwrap();

        let ctx = ToolContext::new(temp.path().to_path_buf());
        let tool = RunScriptTool::default();

        let result = tool
            .execute(serde_json::json!({"file_path": "noop.py", "args": [1, 2]}), &ctx)
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.as_str().unwrap().contains("array of strings"));
    }
}
