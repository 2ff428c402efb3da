//! `ncm move-group`: reassign every router in one group to another.

use ncm_core::{MoveOutcome, MovePlan};

use crate::cli::{GlobalOpts, MoveGroupArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util::{Context, confirm};

pub async fn handle(args: MoveGroupArgs, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let MoveGroupArgs {
        source_group,
        target_group,
    } = args;
    let live = matches!(global.output, OutputFormat::Table | OutputFormat::Plain);
    let quiet = global.quiet;
    let color = output::should_color(&global.color);

    if live {
        output::print_output(
            &format!("Moving all routers from group ID={source_group} to group ID={target_group}"),
            quiet,
        );
    }

    let plan = MovePlan::collect(&ctx.client, &source_group, &target_group).await?;

    let prompt = format!(
        "Loaded IDs for {} routers to be moved. Proceed? [y/N]",
        plan.len()
    );
    if !confirm(&prompt, global.yes, live)? {
        tracing::info!(routers = plan.len(), "move declined");
        return Ok(());
    }

    let report = plan
        .execute(&ctx.client, |outcome: &MoveOutcome| {
            if live {
                let result = output::status_text(
                    &outcome.result.to_string(),
                    outcome.result.is_moved(),
                    color,
                );
                output::print_output(&format!("{}: {result}", outcome.router_id), quiet);
            }
        })
        .await?;

    let summary = match global.output {
        OutputFormat::Table => format!(
            "Moved {} of {} routers to group ID={} ({} failed)",
            report.moved(),
            report.outcomes.len(),
            report.target_group,
            report.failed()
        ),
        OutputFormat::Json => output::render_json(&report, false)?,
        OutputFormat::JsonCompact => output::render_json(&report, true)?,
        OutputFormat::Plain => String::new(),
    };
    output::print_output(&summary, quiet);
    Ok(())
}
