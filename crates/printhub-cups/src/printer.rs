//! CUPS printer adapter built on `lpr` and `lpadmin`.

use std::path::Path;

use async_trait::async_trait;
use tracing;

use printhub_core::config::PrinterConfig;
use printhub_core::result::AppResult;
use printhub_core::traits::Printer;
use printhub_core::types::PrintOptions;

use crate::command::{self, CommandRunner};
use crate::error::CommandError;

/// Sends files to a CUPS queue with `lpr`.
#[derive(Debug, Clone)]
pub struct LprPrinter {
    runner: CommandRunner,
    /// Emit `-o media/sides/fit-to-page` flags.
    pass_options: bool,
}

impl LprPrinter {
    /// Create a printer adapter.
    pub fn new(runner: CommandRunner, pass_options: bool) -> Self {
        Self {
            runner,
            pass_options,
        }
    }

    /// Build an adapter from the printer section of the configuration.
    pub fn from_config(config: &PrinterConfig) -> Self {
        Self::new(
            CommandRunner::with_timeout_secs(config.timeout_seconds),
            config.pass_options,
        )
    }

    /// Arguments passed to `lpr` for `file`.
    pub fn lpr_args(&self, file: &Path, options: &PrintOptions) -> Vec<String> {
        let mut args = vec!["-P".to_string(), options.printer_name.clone()];

        if self.pass_options {
            if !options.media.is_empty() {
                args.push("-o".to_string());
                args.push(format!("media={}", options.media));
            }
            if !options.duplex.is_empty() {
                args.push("-o".to_string());
                args.push(format!("sides={}", options.duplex));
            }
            if options.fit_to_page {
                args.push("-o".to_string());
                args.push("fit-to-page".to_string());
            }
        }

        args.push(file.to_string_lossy().into_owned());
        args
    }
}

#[async_trait]
impl Printer for LprPrinter {
    async fn print(&self, file: &Path, options: &PrintOptions) -> AppResult<()> {
        let args = self.lpr_args(file, options);
        self.runner.run("lpr", &args).await?;
        tracing::info!(
            "Printed '{}' via lpr -P {}",
            file.display(),
            options.printer_name
        );
        Ok(())
    }
}

/// `lpadmin` arguments registering the network printer with the IPP
/// Everywhere driver.
pub fn lpadmin_args(name: &str, ip: &str) -> Vec<String> {
    vec![
        "-p".to_string(),
        name.to_string(),
        "-E".to_string(),
        "-v".to_string(),
        format!("ipp://{ip}/ipp/print"),
        "-m".to_string(),
        "everywhere".to_string(),
    ]
}

/// Register the configured printer with CUPS.
pub async fn setup_printer(config: &PrinterConfig) -> AppResult<()> {
    let ip = config
        .ip
        .as_deref()
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .ok_or_else(|| CommandError::Misconfigured("printer.ip is not set".to_string()))?;

    let runner = CommandRunner::with_timeout_secs(config.setup_timeout_seconds);
    runner.run("lpadmin", lpadmin_args(&config.name, ip)).await?;

    tracing::info!("Printer '{}' set up at ipp://{}/ipp/print", config.name, ip);
    Ok(())
}

/// Readiness of the local CUPS tooling and the configured queue.
#[derive(Debug, Clone)]
pub struct PrinterCheck {
    /// `lpr` is on `PATH`.
    pub lpr_available: bool,
    /// `lpadmin` is on `PATH`.
    pub lpadmin_available: bool,
    /// Output of `lpstat -p <name>`, or the reason it failed.
    pub queue_status: Result<String, String>,
}

/// Inspect the CUPS tooling and the state of the configured queue.
pub async fn check_printer(config: &PrinterConfig) -> PrinterCheck {
    let lpr_available = command::is_available("lpr").await;
    let lpadmin_available = command::is_available("lpadmin").await;

    let runner = CommandRunner::with_timeout_secs(config.timeout_seconds);
    let queue_status = runner
        .run("lpstat", ["-p", config.name.as_str()])
        .await
        .map(|out| out.stdout.trim().to_string())
        .map_err(|e| e.to_string());

    PrinterCheck {
        lpr_available,
        lpadmin_available,
        queue_status,
    }
}
