use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "notedelta",
    about = "Change statistics between two versions of a text document",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log cache and engine activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML engine configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare a saved version against the current one
    Diff(DiffArgs),
    /// Show line, word and character totals of a file
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// The saved version
    pub original: PathBuf,
    /// The current version
    pub current: PathBuf,
    /// Explicit cache key for this pair
    #[arg(long)]
    pub key: Option<String>,
    /// Include the line transcript
    #[arg(long)]
    pub content: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    pub file: PathBuf,
}
