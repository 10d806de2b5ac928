//! rendpack - rendition packaging engine
//!
//! Resolves requested (asset, rendition) pairs to byte streams through a
//! configurable dispatcher chain and streams them into a single zip archive
//! under a cumulative size ceiling, with template-based, collision-free
//! entry naming.

use clap::Parser;

mod asset;
mod cli;
mod commands;
mod config;
mod error;
mod naming;
mod packer;
mod progress;
mod quota;
mod resolver;
mod store;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "rendpack=debug" } else { "rendpack=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Pack(args) => commands::pack::run(cli.config, args),
        Commands::Strategies => commands::strategies::run(cli.config),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
