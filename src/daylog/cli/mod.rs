//! # CLI Layer
//!
//! The only place that knows about terminal I/O. It parses arguments with
//! clap, installs the `tracing` subscriber, calls [`daylog::api::DaylogApi`]
//! and prints the returned messages.
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: dispatch and per-command handlers
//! - `print.rs`: colored output and the detection report

mod commands;
mod print;
mod setup;

pub use commands::run;
