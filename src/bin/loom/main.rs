//! Loom CLI - map JSON documents onto typed records

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("loom=debug,projection_loom=debug")
    } else {
        EnvFilter::new("loom=info,projection_loom=info")
    };

    // stdout carries the mapped documents
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Map(args) => commands::map::execute(args, cli.config.as_deref()),
        Commands::Converters => commands::converters::execute(cli.config.as_deref()),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
