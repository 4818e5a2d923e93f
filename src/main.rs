//! CodeAgent - sandboxed LLM coding agent
//!
//! CLI entry point: forwards the prompt to the model, runs selected tools
//! against the sandboxed working directory, prints the final answer.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use codeagent::agent::{AgentEngine, RunOutcome};
use codeagent::cli::Cli;
use codeagent::config::Config;
use codeagent::llm::{GeminiClient, LlmClient};
use codeagent::tools::ToolContext;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codeagent")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, not stdout - stdout carries the final answer
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("codeagent.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.prompt.is_empty() {
        eprintln!("Usage: codeagent '<prompt>' [--verbose]");
        std::process::exit(1);
    }

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "CodeAgent loaded config: model={}, working_directory={}",
        config.llm.model,
        config.sandbox.working_directory.display()
    );

    let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::from_config(&config.llm)?);
    let tool_ctx = ToolContext::new(config.sandbox.working_directory.clone());
    let engine = AgentEngine::new(llm, tool_ctx, config.agent.max_rounds, cli.verbose);

    match engine.run(&cli.prompt_text()).await {
        RunOutcome::Completed { text, rounds } => {
            info!(%rounds, "Run completed");
            println!("Final response:\n");
            println!("{}", text);
            Ok(())
        }
        RunOutcome::MaxRounds { rounds } => {
            info!(%rounds, "Run hit the round cap");
            println!("Max iterations reached without final response.");
            std::process::exit(1);
        }
        RunOutcome::Fatal { message } => {
            eprintln!("Fatal error: {}", message);
            std::process::exit(1);
        }
    }
}
