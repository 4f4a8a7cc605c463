pub mod account;
pub mod auth;
pub mod client;
pub mod deadline;
pub mod process;
pub mod shared;
pub mod space;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: &Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(action, ctx, flags).await,
        Commands::Account { action } => account::handle(action, ctx, flags).await,
        Commands::Space { action } => space::handle(action, ctx, flags).await,
        Commands::Client { action } => client::handle(action, ctx, flags).await,
        Commands::Process { action } => process::handle(action, ctx, flags).await,
        Commands::Deadline { action } => deadline::handle(action, ctx, flags).await,
    }
}
