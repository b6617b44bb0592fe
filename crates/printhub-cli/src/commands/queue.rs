//! Deferred queue CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use printhub_core::error::AppError;
use printhub_entity::job::PrintJob;
use printhub_worker::JobStore;

/// Arguments for queue commands
#[derive(Debug, Args)]
pub struct QueueArgs {
    /// Queue subcommand
    #[command(subcommand)]
    pub command: QueueCommand,
}

/// Queue subcommands
#[derive(Debug, Subcommand)]
pub enum QueueCommand {
    /// List jobs waiting for quiet hours to end
    List,
}

/// One row of `queue list`
#[derive(Debug, Serialize, Tabled)]
pub struct QueueRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Queued At")]
    pub queued_at: String,
    #[tabled(rename = "Chat")]
    pub chat_id: i64,
    #[tabled(rename = "Printer")]
    pub printer: String,
}

impl QueueRow {
    fn from_job(position: usize, job: &PrintJob) -> Self {
        Self {
            position,
            id: job.id.short(),
            file: job.file_name(),
            queued_at: job.queued_at.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
            chat_id: job.origin.chat_id,
            printer: job.options.printer_name.clone(),
        }
    }
}

/// Execute queue commands
pub async fn execute(args: &QueueArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        QueueCommand::List => {
            let config = super::load_config(env)?;
            tracing::debug!("Reading queue from '{}'", config.queue_file().display());
            let store = JobStore::open(config.queue_file()).await?;
            let jobs = store.list_all().await;
            output::print_list(&rows(&jobs), format);
        }
    }

    Ok(())
}

fn rows(jobs: &[PrintJob]) -> Vec<QueueRow> {
    jobs.iter()
        .enumerate()
        .map(|(i, job)| QueueRow::from_job(i + 1, job))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use chrono::{FixedOffset, TimeZone};
    use printhub_core::config::PrinterConfig;
    use printhub_entity::job::OriginContext;

    #[test]
    fn test_rows_are_numbered_in_queue_order() {
        let queued_at = FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 23, 15, 0)
            .unwrap();
        let options = PrinterConfig::default().print_options();
        let jobs = vec![
            PrintJob::new(
                PathBuf::from("/data/incoming/aa_first.pdf"),
                options.clone(),
                OriginContext { chat_id: 10, message_id: 1 },
                queued_at,
            ),
            PrintJob::new(
                PathBuf::from("/data/incoming/bb_second.jpg"),
                options,
                OriginContext { chat_id: 11, message_id: 2 },
                queued_at,
            ),
        ];

        let rows = rows(&jobs);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].file, "aa_first.pdf");
        assert_eq!(rows[0].queued_at, "2024-03-01 23:15:00 +03:00");
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[1].chat_id, 11);
        assert_eq!(rows[1].id.len(), 8);
    }
}
