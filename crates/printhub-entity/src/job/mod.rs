//! Deferred print job entities.

pub mod model;
pub mod result;

pub use model::{OriginContext, PrintJob};
pub use result::{DrainSummary, JobResult};
