use crate::cli::GlobalFlags;
use crate::cli::subcommands::{DeadlineCommands, ScopedIdArgs};
use crate::commands::shared::input::InputBuilder;
use crate::context::AppContext;
use crate::output::report;

fn scoped(target: &ScopedIdArgs) -> InputBuilder {
    InputBuilder::new()
        .set("space_id", target.space.as_str())
        .set("id", target.id.as_str())
}

/// Handle `juris deadline <subcommand>`.
pub async fn handle(
    action: &DeadlineCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = ctx.request();
    let actions = &ctx.actions;
    match action {
        DeadlineCommands::Create(args) => {
            let input = InputBuilder::new()
                .set("space_id", args.space.as_str())
                .set("process_id", args.process.as_str())
                .set("title", args.title.as_str())
                .set("due_date", args.due.as_str())
                .opt("priority", args.priority.as_deref())
                .opt("status", args.status.as_deref())
                .opt("description", args.description.as_deref())
                .build();
            report(&actions.create_deadline(&request, &input).await, flags.format)
        }
        DeadlineCommands::List(args) => {
            let input = InputBuilder::new()
                .set("space_id", args.space.as_str())
                .page(&args.page, flags)
                .opt("status", args.status.as_deref())
                .opt("priority", args.priority.as_deref())
                .opt("process_id", args.process.as_deref())
                .opt("due_before", args.due_before.as_deref())
                .opt("due_after", args.due_after.as_deref())
                .build();
            report(&actions.list_deadlines(&request, &input).await, flags.format)
        }
        DeadlineCommands::Get(target) => report(
            &actions.get_deadline(&request, &scoped(target).build()).await,
            flags.format,
        ),
        DeadlineCommands::Update(args) => {
            let input = scoped(&args.target)
                .opt("title", args.title.as_deref())
                .opt("due_date", args.due.as_deref())
                .opt("priority", args.priority.as_deref())
                .opt("status", args.status.as_deref())
                .opt("description", args.description.as_deref())
                .clear(&args.clear)
                .build();
            report(&actions.update_deadline(&request, &input).await, flags.format)
        }
        DeadlineCommands::Delete(target) => report(
            &actions.delete_deadline(&request, &scoped(target).build()).await,
            flags.format,
        ),
    }
}
