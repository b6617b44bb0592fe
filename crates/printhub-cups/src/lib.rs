//! # printhub-cups
//!
//! Collaborator adapters that shell out to system tools:
//!
//! - [`LprPrinter`] prints through CUPS with `lpr`
//! - [`setup_printer`] registers the network printer with `lpadmin`
//! - [`LibreOfficeConverter`] turns office documents into PDFs
//!
//! Each adapter only runs a command and translates its exit status; the
//! scheduling logic lives in `printhub-worker`.

pub mod command;
pub mod converter;
pub mod error;
pub mod printer;

pub use command::{CommandOutput, CommandRunner};
pub use converter::LibreOfficeConverter;
pub use error::CommandError;
pub use printer::{LprPrinter, PrinterCheck, check_printer, setup_printer};
