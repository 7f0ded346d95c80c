use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for inspecting playlist sources during development
#[derive(Parser)]
#[command(name = "vodplaylist")]
#[command(about = "Fetch, parse and inspect M3U video playlists", long_about = None)]
pub struct Cli {
    /// Settings file (TOML); defaults to the per-user config file when present
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra playlist URL, appended after the default source (repeatable)
    #[arg(short, long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    /// Override the cache TTL in seconds
    #[arg(long, value_name = "SECS")]
    pub ttl_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog items
    List {
        /// Only entries of this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// List group labels
    Groups,
    /// Show one catalog item
    Meta {
        id: String,
    },
    /// Resolve an item to its stream (the reload id forces a refresh)
    Stream {
        id: String,
    },
    /// Force a refresh and print a summary
    Refresh,
    /// Print the configured sources
    Sources,
}
