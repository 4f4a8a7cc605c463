pub mod account;
pub mod auth;
pub mod client;
pub mod deadline;
pub mod process;
pub mod space;

pub use account::AccountCommands;
pub use auth::AuthCommands;
pub use client::ClientCommands;
pub use deadline::DeadlineCommands;
pub use process::ProcessCommands;
pub use space::SpaceCommands;

use clap::Args;

/// Search and offset shared by list commands; the page size is the global
/// `--limit`.
#[derive(Clone, Debug, Default, Args)]
pub struct PageArgs {
    /// Case-insensitive text search.
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub offset: Option<u32>,
}

/// An entity addressed inside a space.
#[derive(Clone, Debug, Args)]
pub struct ScopedIdArgs {
    /// Space ID (`spc-…`).
    #[arg(long)]
    pub space: String,
    /// Entity ID.
    pub id: String,
}
