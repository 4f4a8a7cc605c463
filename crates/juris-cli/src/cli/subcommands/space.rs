use clap::Subcommand;

use super::PageArgs;

/// Space commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SpaceCommands {
    /// Create a space; you become its owner.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// individual, firm or department.
        #[arg(long = "type")]
        space_type: Option<String>,
    },
    /// List the spaces you belong to.
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long = "type")]
        space_type: Option<String>,
    },
    /// Get a space by ID.
    Get { id: String },
    /// Update a space (owner or admin).
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type")]
        space_type: Option<String>,
        /// Clear an optional field (repeatable).
        #[arg(long)]
        clear: Vec<String>,
    },
    /// Delete a space (owner only).
    Delete { id: String },
    /// List the members of a space.
    Members { id: String },
}
