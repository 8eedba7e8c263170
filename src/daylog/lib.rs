//! # Daylog Architecture
//!
//! Daylog appends summaries of recent project activity to date-named markdown
//! files ("daily notes") in a notes vault. It is a library with a CLI client:
//! everything the binary does goes through [`api::DaylogApi`].
//!
//! Two engines carry the interesting logic, and both are pure:
//!
//! - [`format`] works out which naming convention a vault's daily notes use,
//!   from the filenames alone, and renders filenames in that convention.
//! - [`section`] writes one `### <project>` entry under a `## Projects`
//!   section, replacing an earlier version of the same entry and leaving the
//!   rest of the note untouched.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages, sets up logging       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Parses timeframes, finds repositories                    │
//! │  - Dispatches to commands                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - log, detect, init, config                                │
//! │  - Returns CmdResult with messages, never prints            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engines and collaborators                                  │
//! │  - format, section (pure)                                   │
//! │  - vault (files), activity (git), summary, timeframe        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns `Result<CmdResult>`.
//! It never writes to stdout/stderr and never exits. Diagnostics go through
//! `tracing`; the binary decides where they end up.
//!
//! Configuration is loaded once by the caller and passed into every command.
//! There is no global settings object.
//!
//! ## Testing Strategy
//!
//! 1. **Engines** (`format`, `section`): exhaustive unit tests, no file system.
//! 2. **Commands**: unit tests against temporary vaults, with a fake
//!    [`activity::ActivitySource`] in place of git.
//! 3. **CLI** (`tests/`): the built binary driven through `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`format`]: Date format catalog and inference
//! - [`section`]: Entry merging into markdown documents
//! - [`vault`]: Daily note paths, sampling, reading and writing
//! - [`activity`]: Commit and changed-file sources (git)
//! - [`summary`]: Entry body formatting
//! - [`timeframe`]: `1h` / `today` style windows
//! - [`config`]: YAML configuration
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod activity;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod section;
pub mod summary;
pub mod timeframe;
pub mod vault;
