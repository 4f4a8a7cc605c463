use serde_json::{Value, json};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AccountCommands;
use crate::commands::shared::input::InputBuilder;
use crate::context::AppContext;
use crate::output::report;

/// Handle `juris account <subcommand>`.
pub async fn handle(
    action: &AccountCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = ctx.request();
    let actions = &ctx.actions;
    match action {
        AccountCommands::Show => report(
            &actions.get_current_account(&request, &json!({})).await,
            flags.format,
        ),
        AccountCommands::Update {
            name,
            email,
            phone,
            clear_phone,
        } => {
            let mut input = InputBuilder::new()
                .opt("name", name.as_deref())
                .opt("email", email.as_deref())
                .opt("phone", phone.as_deref());
            if *clear_phone {
                input = input.set("phone", Value::Null);
            }
            report(
                &actions.update_current_account(&request, &input.build()).await,
                flags.format,
            )
        }
    }
}
