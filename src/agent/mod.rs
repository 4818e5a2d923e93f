//! Conversation loop engine

mod engine;

pub use engine::{AgentEngine, RunOutcome, SYSTEM_PROMPT};
