//! Core traits defined in `printhub-core` and implemented by other crates.

pub mod clock;
pub mod converter;
pub mod printer;

pub use clock::{Clock, SystemClock};
pub use converter::Converter;
pub use printer::Printer;
