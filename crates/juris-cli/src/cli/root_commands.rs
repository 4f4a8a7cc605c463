use clap::Subcommand;

use crate::cli::subcommands::{
    AccountCommands, AuthCommands, ClientCommands, DeadlineCommands, ProcessCommands,
    SpaceCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session login, logout and status.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// The signed-in account.
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Spaces (tenants).
    Space {
        #[command(subcommand)]
        action: SpaceCommands,
    },
    /// Clients of a space.
    Client {
        #[command(subcommand)]
        action: ClientCommands,
    },
    /// Legal processes of a space.
    Process {
        #[command(subcommand)]
        action: ProcessCommands,
    },
    /// Deadlines of a space.
    Deadline {
        #[command(subcommand)]
        action: DeadlineCommands,
    },
}
