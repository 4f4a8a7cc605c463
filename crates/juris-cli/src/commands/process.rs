use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ProcessCommands, ScopedIdArgs};
use crate::commands::shared::input::InputBuilder;
use crate::context::AppContext;
use crate::output::report;

fn scoped(target: &ScopedIdArgs) -> InputBuilder {
    InputBuilder::new()
        .set("space_id", target.space.as_str())
        .set("id", target.id.as_str())
}

/// Handle `juris process <subcommand>`.
pub async fn handle(
    action: &ProcessCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = ctx.request();
    let actions = &ctx.actions;
    match action {
        ProcessCommands::Create(args) => {
            let input = InputBuilder::new()
                .set("space_id", args.space.as_str())
                .set("case_number", args.case_number.as_str())
                .set("title", args.title.as_str())
                .opt("client_id", args.client.as_deref())
                .opt("status", args.status.as_deref())
                .opt("court", args.court.as_deref())
                .opt("court_division", args.division.as_deref())
                .opt("subject", args.subject.as_deref())
                .build();
            report(&actions.create_process(&request, &input).await, flags.format)
        }
        ProcessCommands::List {
            space,
            page,
            status,
            client,
        } => {
            let input = InputBuilder::new()
                .set("space_id", space.as_str())
                .page(page, flags)
                .opt("status", status.as_deref())
                .opt("client_id", client.as_deref())
                .build();
            report(&actions.list_processes(&request, &input).await, flags.format)
        }
        ProcessCommands::Get(target) => report(
            &actions.get_process(&request, &scoped(target).build()).await,
            flags.format,
        ),
        ProcessCommands::Update(args) => {
            let input = scoped(&args.target)
                .opt("case_number", args.case_number.as_deref())
                .opt("title", args.title.as_deref())
                .opt("client_id", args.client.as_deref())
                .opt("status", args.status.as_deref())
                .opt("court", args.court.as_deref())
                .opt("court_division", args.division.as_deref())
                .opt("subject", args.subject.as_deref())
                .clear(&args.clear)
                .build();
            report(&actions.update_process(&request, &input).await, flags.format)
        }
        ProcessCommands::Delete(target) => report(
            &actions.delete_process(&request, &scoped(target).build()).await,
            flags.format,
        ),
    }
}
