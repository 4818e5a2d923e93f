//! AgentEngine - drives the model/tool conversation loop

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::llm::{CompletionRequest, LlmClient, Message, Part};
use crate::tools::{ToolContext, ToolExecutor};

/// Fixed system instruction sent with every request
pub const SYSTEM_PROMPT: &str = "\
You are a helpful AI coding agent.

When a user asks a question or makes a request, make a function call plan. You can perform the following operations:

- List files and directories
- Read file contents
- Execute Python files with optional arguments
- Write or overwrite files

All paths you provide should be relative to the working directory. You do not need to specify the working directory \
in your function calls as it is automatically injected for security reasons.";

/// Terminal outcome of a conversation run
///
/// `MaxRounds` is reported distinctly from `Fatal` so a caller can tell
/// "agent is looping" apart from "service is down".
#[derive(Debug)]
pub enum RunOutcome {
    /// The model produced a final text answer
    Completed { text: String, rounds: u32 },

    /// The round cap was exhausted without a text answer
    MaxRounds { rounds: u32 },

    /// The model service call failed; no retry is attempted
    Fatal { message: String },
}

/// Conversation loop engine
///
/// Owns the append-only history for one run. Each round sends the full
/// history plus tool declarations, then inspects the reply: text ends the
/// run, a function call is dispatched and its envelope appended. History
/// is discarded when the run ends; nothing persists across runs.
pub struct AgentEngine {
    llm: Arc<dyn LlmClient>,
    tool_executor: ToolExecutor,
    tool_ctx: ToolContext,
    max_rounds: u32,
    verbose: bool,
}

impl AgentEngine {
    /// Create a new engine with the standard tools
    pub fn new(llm: Arc<dyn LlmClient>, tool_ctx: ToolContext, max_rounds: u32, verbose: bool) -> Self {
        debug!(?tool_ctx, %max_rounds, %verbose, "AgentEngine::new: called");
        Self {
            llm,
            tool_executor: ToolExecutor::standard(),
            tool_ctx,
            max_rounds,
            verbose,
        }
    }

    /// Run the conversation until a text answer, a fatal error, or the
    /// round cap
    ///
    /// Only the first content part of each reply drives the state machine;
    /// any additional parts in the same reply are dropped. This mirrors
    /// the service contract of one decisive part per turn and is a
    /// documented limitation, not an oversight.
    pub async fn run(&self, prompt: &str) -> RunOutcome {
        info!(working_directory = ?self.tool_ctx.working_directory, "Starting conversation");
        let tool_defs = self.tool_executor.definitions();
        let mut messages = vec![Message::user(prompt)];

        for round in 1..=self.max_rounds {
            info!("Conversation round {}/{}", round, self.max_rounds);

            let request = CompletionRequest {
                system_prompt: SYSTEM_PROMPT.to_string(),
                messages: messages.clone(),
                tools: tool_defs.clone(),
            };

            let response = match self.llm.complete(request).await {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "Model service call failed, stopping");
                    return RunOutcome::Fatal { message: e.to_string() };
                }
            };

            if self.verbose {
                println!(
                    "Prompt tokens: {}, Response tokens: {}",
                    response.usage.prompt_tokens, response.usage.response_tokens
                );
            }

            let reply = response.message;
            let Some(part) = reply.parts.first().cloned() else {
                warn!("Model reply contained no content parts");
                return RunOutcome::Fatal {
                    message: "model reply contained no content parts".to_string(),
                };
            };

            messages.push(reply);

            match part {
                Part::Text(text) => {
                    info!(%round, "Model produced final answer");
                    return RunOutcome::Completed { text, rounds: round };
                }
                Part::FunctionCall(call) => {
                    if self.verbose {
                        println!("Calling function: {}({})", call.name, call.args);
                    } else {
                        println!(" - Calling function: {}", call.name);
                    }

                    let tool_message = self.tool_executor.dispatch(&call, &self.tool_ctx).await;

                    if self.verbose
                        && let Some(Part::FunctionResponse(fr)) = tool_message.parts.first()
                    {
                        println!("-> {}", fr.response);
                    }

                    messages.push(tool_message);
                }
                Part::FunctionResponse(_) => {
                    warn!("Model reply carried a function response part");
                    return RunOutcome::Fatal {
                        message: "unexpected function response part in model reply".to_string(),
                    };
                }
            }
        }

        warn!("Round cap ({}) exhausted without a final answer", self.max_rounds);
        RunOutcome::MaxRounds {
            rounds: self.max_rounds,
        }
    }
}
