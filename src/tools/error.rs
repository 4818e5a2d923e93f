//! Tool error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during tool execution
///
/// These never cross the dispatcher boundary as `Err`: the dispatcher
/// converts them into tool-response content so the conversation continues.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Cannot access \"{path}\" as it is outside the permitted working directory {working_directory}")]
    SandboxViolation { path: PathBuf, working_directory: PathBuf },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
