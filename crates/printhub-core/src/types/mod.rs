//! Core type definitions used across the PrintHub workspace.

pub mod id;
pub mod print_options;

pub use id::JobId;
pub use print_options::PrintOptions;
