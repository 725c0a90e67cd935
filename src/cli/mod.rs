//! # Command-Line Interface
//!
//! User-facing commands over a graph file.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `order` | Print a topological order (optionally for `--target` items only) |
//! | `check` | Fail when the graph has a circular dependency |
//! | `deps` | Direct prerequisites and dependents of one item |
//! | `stats` | Size of the graph and whether it is cyclic |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr, or set `RUST_LOG`:
//! ```bash
//! prereq --verbose order courses.toml
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod resolve;

pub use app::{run, Cli, Commands, GraphArgs};
pub use output::{Output, OutputFormat};
