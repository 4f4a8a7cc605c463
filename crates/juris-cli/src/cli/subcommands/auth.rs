use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Open a session for a user, provisioning the account on first login.
    Login(AuthLoginArgs),
    /// Revoke the current session and clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Identity-provider user ID.
    #[arg(long)]
    pub user: String,
    /// Display name for a new account.
    #[arg(long)]
    pub name: Option<String>,
    /// Email for a new account.
    #[arg(long)]
    pub email: Option<String>,
}
