//! Command-line interface for taskgraph
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::output::OutputOptions;

mod check;
mod config;
mod layout;

/// taskgraph - Task Relationship Layout
///
/// Lays out a task list as a timeline: tasks start after their blockers,
/// parent tasks become group boxes, and blocking becomes directed edges.
#[derive(Parser, Debug)]
#[command(name = "taskgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Layout config file (defaults to ./.taskgraph.toml when present)
    #[arg(long, global = true, env = "TASKGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute node positions and edges for a task file
    Layout {
        /// JSON task file (array of tasks, or {"tasks": [...]})
        file: PathBuf,

        /// List every node and edge in human output
        #[arg(long)]
        all: bool,
    },

    /// Report problems in a task file (cycles, dangling references, ...)
    Check {
        /// JSON task file
        file: PathBuf,

        /// Exit non-zero when any problem is found
        #[arg(long)]
        strict: bool,
    },

    /// Show the effective layout configuration
    Config {
        /// Write the effective configuration to this path
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

impl Commands {
    /// Subcommand name used in output envelopes
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Layout { .. } => "layout",
            Commands::Check { .. } => "check",
            Commands::Config { .. } => "config",
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let config = resolve_config(self.config.as_deref())?;

        match self.command {
            Commands::Layout { file, all } => layout::run(layout::LayoutOptions {
                file,
                all,
                config,
                output: options,
            }),
            Commands::Check { file, strict } => check::run(check::CheckOptions {
                file,
                strict,
                config,
                output: options,
            }),
            Commands::Config { write } => config::run(config::ConfigOptions {
                write,
                config,
                output: options,
            }),
        }
    }
}

/// An explicit config path must load; the implicit one falls back to defaults.
fn resolve_config(explicit: Option<&std::path::Path>) -> Result<LayoutConfig> {
    match explicit {
        Some(path) => LayoutConfig::load(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(LayoutConfig::load_from_dir(&cwd))
        }
    }
}
