//! # printhub-core
//!
//! Core crate for PrintHub. Contains the configuration schema, typed
//! identifiers, print option snapshots, the collaborator traits
//! (printer, converter, clock), and the unified error system.
//!
//! This crate has **no** internal dependencies on other PrintHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
