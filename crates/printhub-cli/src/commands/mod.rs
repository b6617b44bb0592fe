//! CLI command definitions and dispatch.

pub mod config;
pub mod printer;
pub mod queue;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use printhub_core::config::AppConfig;
use printhub_core::error::AppError;

/// PrintHub: quiet-hours aware printing service
#[derive(Debug, Parser)]
#[command(name = "printhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment, selects `config/<env>.toml` on top of the defaults
    #[arg(short, long, env = "PRINTHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Deferred print queue
    Queue(queue::QueueArgs),
    /// CUPS printer management
    Printer(printer::PrinterArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, &self.env, self.format).await,
            Commands::Queue(args) => queue::execute(args, &self.env, self.format).await,
            Commands::Printer(args) => printer::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_queue_list_as_json() {
        let cli = Cli::try_parse_from(["printhub", "--format", "json", "queue", "list"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Queue(_)));
    }
}
