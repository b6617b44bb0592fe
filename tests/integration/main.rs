//! HTTP-level integration tests for the PrintHub API.

mod helpers;

mod access_test;
mod print_test;
mod queue_test;
mod status_test;
