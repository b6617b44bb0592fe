//! Print scheduling core for PrintHub.
//!
//! This crate provides:
//! - The quiet-hours policy deciding when printing is suppressed
//! - A file-backed FIFO of deferred jobs with exclusive access
//! - The dispatcher routing incoming files to the printer or the queue
//! - A cancellable runner that replays the queue after quiet hours

pub mod dispatcher;
pub mod executor;
pub mod policy;
pub mod runner;
pub mod store;

#[cfg(test)]
mod testing;

pub use dispatcher::{DispatchOutcome, Dispatcher, ProcessOutcome};
pub use executor::{ExecutionError, IncomingFile, JobProcessor, PrintExecutor};
pub use policy::QuietHoursPolicy;
pub use runner::QueueRunner;
pub use store::{DrainReport, JobStore};
