use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "mailshift")]
#[command(about = "Plan shared mailbox moves and permission grants for a migration batch", long_about = None)]
pub struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score shared mailboxes by permission overlap with the batch users
    Score(ScoreArgs),
    /// Translate exported ACL entries touching the batch into grant actions
    Map(MapArgs),
}

/// Arguments of `mailshift score`.
#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Batch user list, one email address per row
    #[arg(long)]
    pub users: PathBuf,
    /// Candidate shared mailbox list, one email address per row
    #[arg(long)]
    pub shared: PathBuf,
    /// Permission export with six columns per row
    #[arg(long)]
    pub permissions: PathBuf,
    /// Shared mailboxes that must never be marked eligible
    #[arg(long)]
    pub exclusions: Option<PathBuf>,
    /// Minimum in-batch percentage, overrides MAILSHIFT_THRESHOLD
    #[arg(long)]
    pub threshold: Option<u8>,
    /// Report destination, written to stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments of `mailshift map`.
#[derive(Debug, Args)]
pub struct MapArgs {
    /// Batch user list, one email address per row
    #[arg(long)]
    pub users: PathBuf,
    /// Permission export with six columns per row
    #[arg(long)]
    pub permissions: PathBuf,
    /// JSON table of localized well-known folder names per mailbox
    #[arg(long)]
    pub folder_names: Option<PathBuf>,
    /// Hand executable grants to the grant executor instead of only reporting
    #[arg(long)]
    pub apply: bool,
    /// Report destination, written to stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
}
