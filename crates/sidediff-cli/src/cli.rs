use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sidediff_core::DiffMethod;

#[derive(Parser)]
#[command(
    name = "sidediff",
    about = "Side-by-side line and word diff",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file; command-line flags take precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two files row by row
    Diff(DiffArgs),
    /// Count added, removed and modified lines
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Intra-line granularity (chars, words, words-with-space, lines, trimmed-lines, sentences, css)
    #[arg(short, long)]
    pub method: Option<DiffMethod>,
    /// Show modified lines whole
    #[arg(long)]
    pub no_word_diff: bool,
    /// Added to every line number
    #[arg(long)]
    pub offset: Option<usize>,
    /// Unchanged lines kept around each change
    #[arg(short = 'C', long)]
    pub context: Option<usize>,
    /// Show every line instead of folding unchanged context
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[arg(short, long)]
    pub method: Option<DiffMethod>,
}
