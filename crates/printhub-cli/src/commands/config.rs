//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use printhub_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(env)?;
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => match super::load_config(env) {
            Ok(config) => {
                output::print_success(&format!("Configuration for '{}' is valid", env));
                output::print_kv(
                    "Server",
                    &format!("{}:{}", config.server.host, config.server.port),
                );
                output::print_kv("Printer", &config.printer.name);
                output::print_kv(
                    "Quiet hours",
                    &format!(
                        "{}-{} ({})",
                        config.quiet_hours.start, config.quiet_hours.end, config.quiet_hours.timezone
                    ),
                );
                output::print_kv("Queue file", &config.queue_file().display().to_string());
                output::print_kv(
                    "Allowed users",
                    &config.access.allowed_user_ids.len().to_string(),
                );
                if !config.access.is_configured() {
                    output::print_warning("No allowed user IDs configured; all requests will be refused");
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}
