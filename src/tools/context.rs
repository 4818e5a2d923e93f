//! ToolContext - sandboxed execution context for tools

use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::ToolError;

/// Execution context for tools - fixed for the process lifetime
///
/// All file and process operations are scoped to `working_directory`.
/// Tools never resolve paths themselves; they go through `validate_path`,
/// which is what keeps model-supplied paths inside the sandbox.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Sandbox root - all tool operations constrained here
    pub working_directory: PathBuf,
}

impl ToolContext {
    /// Create a new tool context rooted at the given directory
    ///
    /// The root is held in absolute form; the containment check in
    /// `validate_path` compares against it component-wise.
    pub fn new(working_directory: PathBuf) -> Self {
        debug!(?working_directory, "ToolContext::new: called");
        let working_directory = match working_directory.canonicalize() {
            Ok(p) => p,
            Err(_) => {
                // Root may not exist yet; absolutize against the current dir
                let absolute = if working_directory.is_absolute() {
                    working_directory
                } else {
                    std::env::current_dir()
                        .unwrap_or_else(|_| PathBuf::from("."))
                        .join(working_directory)
                };
                normalize(&absolute)
            }
        };
        Self { working_directory }
    }

    /// Validate a model-supplied path is within the working directory
    ///
    /// The containment check runs on the normalized absolute form, after
    /// `.` and `..` components are resolved, so traversal sequences cannot
    /// escape. Existing paths are additionally canonicalized so symlinks
    /// cannot point outside the root. No I/O is performed on violation.
    pub fn validate_path(&self, path: &Path) -> Result<PathBuf, ToolError> {
        debug!(?path, "ToolContext::validate_path: called");
        let joined = if path.is_absolute() {
            debug!("ToolContext::validate_path: path is absolute");
            path.to_path_buf()
        } else {
            debug!("ToolContext::validate_path: path is relative, joining with working directory");
            self.working_directory.join(path)
        };

        let normalized = normalize(&joined);

        let resolved = if normalized.exists() {
            debug!("ToolContext::validate_path: path exists, canonicalizing");
            normalized.canonicalize().unwrap_or_else(|_| normalized.clone())
        } else {
            debug!("ToolContext::validate_path: path does not exist, using normalized form");
            normalized
        };

        if resolved.starts_with(&self.working_directory) {
            debug!(?resolved, "ToolContext::validate_path: path is within working directory");
            Ok(resolved)
        } else {
            debug!("ToolContext::validate_path: sandbox violation detected");
            Err(ToolError::SandboxViolation {
                path: path.to_path_buf(),
                working_directory: self.working_directory.clone(),
            })
        }
    }
}

/// Resolve `.` and `..` components lexically
///
/// `canonicalize` alone cannot be used for the containment check: it fails
/// on paths that do not exist yet (new files), and an unresolved `..` in a
/// joined path would defeat a component-wise prefix comparison.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other),
        }
    }
    out
}
