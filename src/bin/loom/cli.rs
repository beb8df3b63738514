//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Loom - map JSON documents onto typed records
#[derive(Parser)]
#[command(name = "loom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of ~/.loom/config.toml and .loom/config.toml
    #[arg(long, global = true, env = "LOOM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map JSON documents onto the record declared by a schema
    Map(MapArgs),

    /// List the active converter chain in precedence order
    Converters,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct MapArgs {
    /// Schema file declaring the target record
    #[arg(long, short)]
    pub schema: PathBuf,

    /// JSON input file (reads stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
