use clap::{Args, Subcommand};

use super::{PageArgs, ScopedIdArgs};

/// Client commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClientCommands {
    /// Create a client.
    Create(ClientCreateArgs),
    /// List clients.
    List {
        #[arg(long)]
        space: String,
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "type")]
        client_type: Option<String>,
    },
    /// Get a client by ID.
    Get(ScopedIdArgs),
    /// Update a client.
    Update(ClientUpdateArgs),
    /// Delete a client.
    Delete(ScopedIdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ClientCreateArgs {
    #[arg(long)]
    pub space: String,
    #[arg(long)]
    pub name: String,
    /// individual or company.
    #[arg(long = "type")]
    pub client_type: String,
    /// Tax document; punctuation is ignored.
    #[arg(long)]
    pub document: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ClientUpdateArgs {
    #[command(flatten)]
    pub target: ScopedIdArgs,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub client_type: Option<String>,
    #[arg(long)]
    pub document: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Clear an optional field (repeatable).
    #[arg(long)]
    pub clear: Vec<String>,
}
