use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ClientCommands, ScopedIdArgs};
use crate::commands::shared::input::InputBuilder;
use crate::context::AppContext;
use crate::output::report;

fn scoped(target: &ScopedIdArgs) -> InputBuilder {
    InputBuilder::new()
        .set("space_id", target.space.as_str())
        .set("id", target.id.as_str())
}

/// Handle `juris client <subcommand>`.
pub async fn handle(
    action: &ClientCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = ctx.request();
    let actions = &ctx.actions;
    match action {
        ClientCommands::Create(args) => {
            let input = InputBuilder::new()
                .set("space_id", args.space.as_str())
                .set("name", args.name.as_str())
                .set("client_type", args.client_type.as_str())
                .set("document_number", args.document.as_str())
                .opt("email", args.email.as_deref())
                .opt("phone", args.phone.as_deref())
                .opt("status", args.status.as_deref())
                .opt("notes", args.notes.as_deref())
                .build();
            report(&actions.create_client(&request, &input).await, flags.format)
        }
        ClientCommands::List {
            space,
            page,
            status,
            client_type,
        } => {
            let input = InputBuilder::new()
                .set("space_id", space.as_str())
                .page(page, flags)
                .opt("status", status.as_deref())
                .opt("client_type", client_type.as_deref())
                .build();
            report(&actions.list_clients(&request, &input).await, flags.format)
        }
        ClientCommands::Get(target) => report(
            &actions.get_client(&request, &scoped(target).build()).await,
            flags.format,
        ),
        ClientCommands::Update(args) => {
            let input = scoped(&args.target)
                .opt("name", args.name.as_deref())
                .opt("client_type", args.client_type.as_deref())
                .opt("document_number", args.document.as_deref())
                .opt("email", args.email.as_deref())
                .opt("phone", args.phone.as_deref())
                .opt("status", args.status.as_deref())
                .opt("notes", args.notes.as_deref())
                .clear(&args.clear)
                .build();
            report(&actions.update_client(&request, &input).await, flags.format)
        }
        ClientCommands::Delete(target) => report(
            &actions.delete_client(&request, &scoped(target).build()).await,
            flags.format,
        ),
    }
}
