use clap::{Args, Subcommand};

use super::{PageArgs, ScopedIdArgs};

/// Deadline commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DeadlineCommands {
    /// Create a deadline on a process.
    Create(DeadlineCreateArgs),
    /// List deadlines.
    List(DeadlineListArgs),
    /// Get a deadline by ID.
    Get(ScopedIdArgs),
    /// Update a deadline.
    Update(DeadlineUpdateArgs),
    /// Delete a deadline.
    Delete(ScopedIdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DeadlineCreateArgs {
    #[arg(long)]
    pub space: String,
    #[arg(long)]
    pub process: String,
    #[arg(long)]
    pub title: String,
    /// Due date (YYYY-MM-DD).
    #[arg(long)]
    pub due: String,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DeadlineListArgs {
    #[arg(long)]
    pub space: String,
    #[command(flatten)]
    pub page: PageArgs,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub process: Option<String>,
    /// Only deadlines due on or before this date.
    #[arg(long)]
    pub due_before: Option<String>,
    /// Only deadlines due on or after this date.
    #[arg(long)]
    pub due_after: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DeadlineUpdateArgs {
    #[command(flatten)]
    pub target: ScopedIdArgs,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub due: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Clear an optional field (repeatable).
    #[arg(long)]
    pub clear: Vec<String>,
}
