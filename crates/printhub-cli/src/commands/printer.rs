//! CUPS printer CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use printhub_core::error::AppError;
use printhub_cups::{PrinterCheck, check_printer, setup_printer};

/// Arguments for printer commands
#[derive(Debug, Args)]
pub struct PrinterArgs {
    /// Printer subcommand
    #[command(subcommand)]
    pub command: PrinterCommand,
}

/// Printer subcommands
#[derive(Debug, Subcommand)]
pub enum PrinterCommand {
    /// Register the configured network printer with CUPS
    Setup {
        /// Printer IP address, overriding `printer.ip`
        #[arg(long)]
        ip: Option<String>,
    },
    /// Check CUPS tooling and the state of the configured queue
    Check,
}

/// Execute printer commands
pub async fn execute(args: &PrinterArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;

    match &args.command {
        PrinterCommand::Setup { ip } => {
            if let Some(ip) = ip {
                config.printer.ip = Some(ip.clone());
            }
            setup_printer(&config.printer).await?;
            output::print_success(&format!(
                "Printer '{}' registered with CUPS",
                config.printer.name
            ));
        }
        PrinterCommand::Check => {
            let check = check_printer(&config.printer).await;
            print_check(&config.printer.name, &check);
            if let Err(reason) = &check.queue_status {
                return Err(AppError::external_service(format!(
                    "Printer '{}' is not ready: {}",
                    config.printer.name, reason
                )));
            }
        }
    }

    Ok(())
}

fn print_check(name: &str, check: &PrinterCheck) {
    println!("Printer '{}':", name);
    output::print_kv("lpr", availability(check.lpr_available));
    output::print_kv("lpadmin", availability(check.lpadmin_available));
    match &check.queue_status {
        Ok(status) => output::print_kv("Queue", status.trim()),
        Err(reason) => output::print_kv("Queue", reason),
    }
}

fn availability(available: bool) -> &'static str {
    if available { "available" } else { "missing" }
}
