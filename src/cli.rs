//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// CodeAgent - sandboxed LLM coding agent
#[derive(Parser)]
#[command(
    name = "codeagent",
    about = "Forward a prompt to an LLM agent with sandboxed file and script tools",
    version,
    after_help = "Logs are written to: ~/.local/share/codeagent/logs/codeagent.log"
)]
pub struct Cli {
    /// Prompt words (joined with spaces)
    #[arg(value_name = "PROMPT")]
    pub prompt: Vec<String>,

    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (per-round tool calls and token usage)
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Cli {
    /// The full prompt as a single string
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_words_joined() {
        let cli = Cli::try_parse_from(["codeagent", "list", "files", "in", "the", "root"]).unwrap();
        assert_eq!(cli.prompt_text(), "list files in the root");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["codeagent", "--verbose", "hello"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.prompt_text(), "hello");
    }

    #[test]
    fn test_empty_prompt_parses() {
        // Missing prompt is handled by main (usage message, exit 1), not clap
        let cli = Cli::try_parse_from(["codeagent"]).unwrap();
        assert!(cli.prompt.is_empty());
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::try_parse_from(["codeagent", "--config", "custom.yml", "hi"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.yml")));
    }
}
