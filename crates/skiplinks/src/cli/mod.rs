//! Command-line interface for skiplinks.
//!
//! This module provides the CLI structure for the `skiplinks` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

pub use commands::{CheckCommand, ConfigCommand, InstallCommand, RenderCommand};

/// skiplinks - Accessible skip links for server-rendered pages
///
/// Renders DSFR skip links, checks that pages define them, and installs the
/// skip links partial into a project.
#[derive(Debug, Parser)]
#[command(name = "skiplinks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render skip links
    Render(RenderCommand),

    /// Check a route against the whitelist
    Check(CheckCommand),

    /// Install the skip links partial into a project
    Install(InstallCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Load the configuration selected by `--config`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_config(&self) -> crate::Result<Config> {
        Config::load_from(self.config.clone())
    }
}

/// Validate a configuration file, returning whether it passed and the line
/// to show the user.
///
/// Parse failures are reported here rather than propagated, so a broken file
/// still gets a readable diagnosis.
#[must_use]
pub fn validate_config_file(path: PathBuf) -> (bool, String) {
    match Config::load_validated(Some(path)) {
        Ok(_) => (true, "Configuration is valid.".to_string()),
        Err(e) => (false, format!("Configuration error: {e}")),
    }
}
