use clap::Subcommand;

/// Commands on the signed-in account.
#[derive(Clone, Debug, Subcommand)]
pub enum AccountCommands {
    /// Show the current account.
    Show,
    /// Update the current account.
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, conflicts_with = "clear_phone")]
        phone: Option<String>,
        /// Remove the stored phone number.
        #[arg(long)]
        clear_phone: bool,
    },
}
