use clap::{Args, Subcommand};

use super::{PageArgs, ScopedIdArgs};

/// Process commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProcessCommands {
    /// Create a process.
    Create(ProcessCreateArgs),
    /// List processes.
    List {
        #[arg(long)]
        space: String,
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        client: Option<String>,
    },
    /// Get a process by ID.
    Get(ScopedIdArgs),
    /// Update a process.
    Update(ProcessUpdateArgs),
    /// Delete a process and its deadlines.
    Delete(ScopedIdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProcessCreateArgs {
    #[arg(long)]
    pub space: String,
    /// Twenty-digit case number, formatted or bare.
    #[arg(long)]
    pub case_number: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub court: Option<String>,
    #[arg(long)]
    pub division: Option<String>,
    #[arg(long)]
    pub subject: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ProcessUpdateArgs {
    #[command(flatten)]
    pub target: ScopedIdArgs,
    #[arg(long)]
    pub case_number: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub court: Option<String>,
    #[arg(long)]
    pub division: Option<String>,
    #[arg(long)]
    pub subject: Option<String>,
    /// Clear an optional field (repeatable), e.g. `--clear client_id`.
    #[arg(long)]
    pub clear: Vec<String>,
}
