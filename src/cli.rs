//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rendpack - rendition packaging engine
///
/// Packages named renditions of content-store assets into a single zip archive.
#[derive(Parser, Debug)]
#[command(
    name = "rendpack",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Rendition packaging engine for content-store assets",
    long_about = "rendpack resolves each requested (asset, rendition) pair to a byte stream \
                  through a configurable dispatcher chain, streams the results into a zip \
                  archive under a cumulative size ceiling, and names every entry from a \
                  user-configurable template with collision-free uniqueness.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  rendpack pack --content ./content --asset test.png --rendition original\n    \
                  rendpack pack --content ./content --asset a.png --asset b.png \\\n        \
                  --rendition original --rendition thumbnail --name \"My Assets\"\n    \
                  rendpack strategies\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/rendpack/rendpack"
)]
pub struct Cli {
    /// Configuration file (defaults to ./rendpack.yaml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package asset renditions into a zip archive
    Pack(PackArgs),

    /// List registered packaging strategies and dispatchers
    Strategies,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the pack command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Pack one rendition of one asset:\n    \
                  rendpack pack --content ./content --asset test.png --rendition original\n\n  \
                  Pack several assets and renditions (entries grouped per asset):\n    \
                  rendpack pack --content ./content --asset a.png --asset b.png \\\n        \
                  --rendition original --rendition thumbnail\n\n  \
                  Override the archive base name:\n    \
                  rendpack pack --content ./content --asset a.png --rendition original \\\n        \
                  --name \"My Assets\"\n\n  \
                  Write a timestamped archive into a directory:\n    \
                  rendpack pack --content ./content --asset a.png --rendition original \\\n        \
                  --out ./downloads --timestamp")]
pub struct PackArgs {
    /// Content store root directory
    #[arg(long, value_name = "DIR")]
    pub content: PathBuf,

    /// Asset name to package; repeat for multiple assets (order is preserved)
    #[arg(long = "asset", value_name = "NAME", required = true)]
    pub assets: Vec<String>,

    /// Rendition name to package; repeat for multiple renditions (order is preserved)
    #[arg(long = "rendition", value_name = "NAME", required = true)]
    pub renditions: Vec<String>,

    /// Packaging strategy identifier
    #[arg(long, default_value = "zip")]
    pub strategy: String,

    /// Base archive name, overriding the configured one
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Output file, or directory to place the archive in (defaults to the
    /// current directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Embed a request timestamp in the archive name, e.g. "Assets (08-26 03-45PM).zip"
    #[arg(long)]
    pub timestamp: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
