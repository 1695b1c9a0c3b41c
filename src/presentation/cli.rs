// Command-line interface definition
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "observability-dashboards")]
#[command(about = "Generate the Nebius observability dashboards as Grafana JSON", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to config/generator.* when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and write every dashboard as <uid>.json
    Generate {
        /// Output directory (overrides output.directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate every dashboard without writing anything
    Check,

    /// List dashboard uids and titles
    List,

    /// Print one dashboard's JSON to stdout
    Render {
        /// Dashboard uid
        uid: String,
    },

    /// Print the effective configuration
    Config,

    /// Serve the rendered dashboards over HTTP for preview
    Serve {
        /// Listen address (overrides server.address)
        #[arg(short, long)]
        addr: Option<String>,
    },
}
