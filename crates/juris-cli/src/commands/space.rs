use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SpaceCommands;
use crate::commands::shared::input::InputBuilder;
use crate::context::AppContext;
use crate::output::report;

/// Handle `juris space <subcommand>`.
pub async fn handle(
    action: &SpaceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = ctx.request();
    let actions = &ctx.actions;
    match action {
        SpaceCommands::Create {
            name,
            description,
            space_type,
        } => {
            let input = InputBuilder::new()
                .set("name", name.as_str())
                .opt("description", description.as_deref())
                .opt("space_type", space_type.as_deref())
                .build();
            report(&actions.create_space(&request, &input).await, flags.format)
        }
        SpaceCommands::List { page, space_type } => {
            let input = InputBuilder::new()
                .page(page, flags)
                .opt("space_type", space_type.as_deref())
                .build();
            report(&actions.list_spaces(&request, &input).await, flags.format)
        }
        SpaceCommands::Get { id } => report(
            &actions.get_space(&request, &json!({ "id": id })).await,
            flags.format,
        ),
        SpaceCommands::Update {
            id,
            name,
            description,
            space_type,
            clear,
        } => {
            let input = InputBuilder::new()
                .set("id", id.as_str())
                .opt("name", name.as_deref())
                .opt("description", description.as_deref())
                .opt("space_type", space_type.as_deref())
                .clear(clear)
                .build();
            report(&actions.update_space(&request, &input).await, flags.format)
        }
        SpaceCommands::Delete { id } => report(
            &actions.delete_space(&request, &json!({ "id": id })).await,
            flags.format,
        ),
        SpaceCommands::Members { id } => report(
            &actions.list_space_members(&request, &json!({ "id": id })).await,
            flags.format,
        ),
    }
}
