//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::resolve;
use crate::domain::{KeyOrder, Resolver};
use crate::storage::{Config, GraphFormat};

#[derive(Parser)]
#[command(name = "prereq")]
#[command(author, version, about = "Order items so that every prerequisite comes first")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Comparator used to order graph keys
    #[arg(long, global = true)]
    pub key_order: Option<KeyOrder>,

    /// Configuration file to use instead of looking up .prereq.toml
    #[arg(long, global = true, env = "PREREQ_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the graph from
#[derive(Args)]
pub struct GraphArgs {
    /// Graph file (.json, .yaml, .yml, .toml), or - for stdin
    pub file: PathBuf,

    /// Force the input format instead of guessing from the extension
    #[arg(long)]
    pub input_format: Option<GraphFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print items so that each one follows its prerequisites
    Order {
        #[command(flatten)]
        graph: GraphArgs,

        /// Only order these items and their prerequisites (repeatable)
        #[arg(long = "target", short = 't')]
        targets: Vec<String>,

        /// Print an order even if the graph has a cycle
        #[arg(long)]
        allow_cycles: bool,
    },

    /// Fail if the graph contains a circular dependency
    Check {
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Show the direct prerequisites and dependents of an item
    Deps {
        #[command(flatten)]
        graph: GraphArgs,

        /// Item to inspect
        item: String,
    },

    /// Summarize the graph
    Stats {
        #[command(flatten)]
        graph: GraphArgs,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    debug!(project_file = ?config.project_file, "configuration loaded");

    let output = Output::new(cli.format.unwrap_or(config.default_format));
    let resolver = Resolver::new().with_key_order(cli.key_order.unwrap_or(config.key_order));

    match cli.command {
        Commands::Order {
            graph,
            targets,
            allow_cycles,
        } => resolve::order(
            &output,
            &resolver,
            &graph,
            &targets,
            allow_cycles || config.allow_cycles,
        )?,
        Commands::Check { graph } => resolve::check(&output, &resolver, &graph)?,
        Commands::Deps { graph, item } => resolve::deps(&output, &graph, &item)?,
        Commands::Stats { graph } => resolve::stats(&output, &resolver, &graph)?,
    }

    debug!("command completed");
    Ok(())
}

/// Installs the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug level.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "prereq=debug" } else { "warn" })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
