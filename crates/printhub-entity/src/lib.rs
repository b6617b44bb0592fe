//! # printhub-entity
//!
//! Domain entity models for PrintHub: the persisted print job record,
//! drain results, and inbound document classification. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod document;
pub mod job;

pub use document::DocumentKind;
pub use job::{DrainSummary, JobResult, OriginContext, PrintJob};
