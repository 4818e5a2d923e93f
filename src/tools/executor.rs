//! ToolExecutor - tool registry and function dispatcher

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::llm::{FunctionCall, Message, Part, ToolDefinition};

use super::builtin::{ListFilesTool, ReadFileTool, RunScriptTool, WriteFileTool};
use super::{Tool, ToolContext};

/// Fixed registry pairing each tool's schema with its implementation
///
/// The set of tools is fixed per process; there is no dynamic
/// registration. Schemas go to the model via `definitions`, dispatch stays
/// local.
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the standard tools
    pub fn standard() -> Self {
        let mut tools: HashMap<String, Box<dyn Tool>> = HashMap::new();

        tools.insert("list_files".into(), Box::new(ListFilesTool));
        tools.insert("read_file".into(), Box::new(ReadFileTool));
        tools.insert("write_file".into(), Box::new(WriteFileTool));
        tools.insert("run_script".into(), Box::new(RunScriptTool::default()));

        Self { tools }
    }

    /// Get tool definitions for the model
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.parameters()))
            .collect()
    }

    /// Dispatch a model-issued function call
    ///
    /// The working directory is always injected into the argument set,
    /// overwriting any value the model may have supplied: tools resolve
    /// paths only through the context, so the injected value wins no
    /// matter what the model sends. The returned message is always a
    /// role=tool envelope; tool failures never abort the conversation.
    pub async fn dispatch(&self, call: &FunctionCall, ctx: &ToolContext) -> Message {
        debug!(name = %call.name, "ToolExecutor::dispatch: called");
        let args = inject_working_directory(call.args.clone(), ctx);

        let Some(tool) = self.tools.get(&call.name) else {
            debug!(name = %call.name, "ToolExecutor::dispatch: unknown function");
            return Message::tool(Part::function_response(
                &call.name,
                serde_json::json!({ "error": format!("Unknown function: {}", call.name) }),
            ));
        };

        let result = match tool.execute(args, ctx).await {
            Ok(result) => {
                debug!(name = %call.name, is_error = %result.is_error, "ToolExecutor::dispatch: tool returned");
                result.content
            }
            Err(e) => {
                debug!(name = %call.name, error = %e, "ToolExecutor::dispatch: converting tool error to text");
                Value::String(format!("Exception while running {}: {}", call.name, e))
            }
        };

        Message::tool(Part::function_response(&call.name, serde_json::json!({ "result": result })))
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}

/// Overwrite any model-supplied `working_directory` argument with the fixed
/// sandbox root
fn inject_working_directory(args: Value, ctx: &ToolContext) -> Value {
    let injected = Value::String(ctx.working_directory.display().to_string());
    match args {
        Value::Object(mut map) => {
            map.insert("working_directory".to_string(), injected);
            Value::Object(map)
        }
        _ => {
            // Model sent no argument object at all; start from scratch
            let mut map = serde_json::Map::new();
            map.insert("working_directory".to_string(), injected);
            Value::Object(map)
        }
    }
}
