//! # clinic-desk CLI
//!
//! Command-line interface for the clinic admin console's route table.
//!
//! ## Usage
//!
//! - `clinic-desk routes` - List every registered route
//! - `clinic-desk resolve "/blogs/42"` - Resolve one URL
//! - `clinic-desk navigate /appointments /reviews?status=pending --back 1` - Replay navigations
//! - `clinic-desk href blog-edit blogId=42` - Build the link to a page
//! - `clinic-desk filters reviews` - List filter options for a domain
//! - `clinic-desk check` - Verify the route table would boot

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{
    check_command, filters_command, href_command, navigate_command, resolve_command,
    routes_command,
};
use config::DeskConfigLoader;

/// clinic-desk - Inspect and exercise the clinic admin route table
#[derive(Parser)]
#[command(name = "clinic-desk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and exercise the clinic admin route table")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base path override, e.g. /admin
    #[arg(long, global = true)]
    base_path: Option<String>,

    /// Treat trailing slashes as significant
    #[arg(long, global = true)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON where supported
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered route
    Routes,

    /// Resolve one URL to its page
    Resolve {
        /// URL or path, e.g. "/questions?status=answered"
        url: String,
    },

    /// Replay a sequence of navigations
    Navigate {
        /// URLs to navigate to, in order
        #[arg(required = true)]
        urls: Vec<String>,

        /// Go back this many times afterwards
        #[arg(long, default_value_t = 0)]
        back: usize,
    },

    /// Build the URL path of a page
    Href {
        /// Page machine name, e.g. blog-detail
        page: String,

        /// Path parameters as NAME=VALUE
        params: Vec<String>,
    },

    /// List filter options for a domain (reviews, questions, appointments, blogs)
    Filters {
        domain: String,
    },

    /// Build the route table and report startup errors
    Check,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> DeskConfigLoader {
    let mut loader = DeskConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base_path) = &cli.base_path {
        loader = loader.with_base_path_override(base_path.clone());
    }

    if cli.strict {
        loader = loader.with_strict_override(true);
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; an explicit RUST_LOG wins over --verbose
    if std::env::var_os("RUST_LOG").is_some() {
        clinic_desk_core::init_tracing();
    } else {
        clinic_desk_core::init_tracing_with_debug(cli.verbose);
    }

    let config_loader = build_config_loader(&cli);

    match cli.command {
        Commands::Routes => routes_command(config_loader, cli.json).await,
        Commands::Resolve { url } => resolve_command(url, config_loader, cli.json).await,
        Commands::Navigate { urls, back } => navigate_command(urls, back, config_loader).await,
        Commands::Href { page, params } => href_command(page, params, config_loader).await,
        Commands::Filters { domain } => filters_command(domain, cli.json).await,
        Commands::Check => check_command(config_loader).await,
    }
}
