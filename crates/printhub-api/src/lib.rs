//! # printhub-api
//!
//! HTTP API layer for PrintHub built on Axum.
//!
//! Accepts uploads from allow-listed requesters, reports queue and printer
//! status, and triggers manual queue processing. Also owns server startup
//! and the background replay loop's lifecycle.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, build_state_with, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
