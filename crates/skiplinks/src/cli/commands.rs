//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::route::RouteId;

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Fill a content slot (e.g. `content_skip_link_text=Aller au formulaire`)
    #[arg(short, long = "slot", value_name = "KEY=VALUE", value_parser = parse_slot)]
    pub slots: Vec<(String, String)>,

    /// Route of the page being rendered (`controller#action`)
    #[arg(short, long)]
    pub route: Option<RouteId>,

    /// Render as in test execution, running the presence check
    #[arg(short, long, requires = "route")]
    pub test: bool,

    /// Wrap the links in the full navigation block
    #[arg(short, long)]
    pub block: bool,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Route to check (`controller#action`)
    pub route: RouteId,

    /// The page defines its own skip links
    #[arg(long)]
    pub has_skip_links: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Install command arguments.
#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Project root
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Don't patch the application layout
    #[arg(long)]
    pub skip_layout: bool,

    /// Overwrite an existing partial
    #[arg(short, long)]
    pub force: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file paths
    Path,

    /// Validate configuration, including whitelist entry format
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Parse a `KEY=VALUE` slot argument.
fn parse_slot(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
