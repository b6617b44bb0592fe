//! Route handlers organized by domain.

pub mod health;
pub mod print;
pub mod queue;
pub mod status;
