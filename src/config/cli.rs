use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "flowctl")]
#[command(about = "Convert and inspect exported flow definitions")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Re-encode a JSON or YAML document
    Convert {
        input: PathBuf,

        /// Target mode: json or yaml (defaults to serde.default_mode from config)
        #[arg(short, long)]
        mode: Option<String>,

        /// Output file; without it the result goes to export.directory or stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load a flow snapshot and print a summary
    Inspect { input: PathBuf },
}
