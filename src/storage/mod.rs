//! # Storage Layer
//!
//! Reading graphs and configuration from disk.
//!
//! ## File Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Graph | JSON, YAML or TOML map of item to prerequisites | any path, or `-` for stdin |
//! | Config | TOML | `.prereq.toml` (project), `~/.config/prereq/config.toml` (global) |
//!
//! A graph file for three courses:
//!
//! ```toml
//! algorithms = ["data structures"]
//! "data structures" = ["discrete math"]
//! "discrete math" = []
//! ```

mod loader;
mod config;

pub use loader::{is_stdin, load_graph, parse_graph, GraphFormat, LoadError};
pub use config::{Config, ConfigError, ConfigFile, PROJECT_CONFIG_FILE};
