use std::io::Write;

use elmcheck_core::{ActionInputs, ElmcheckError, GitHubContext, ReviewReport};

use crate::annotations::to_annotations;
use crate::args::build_args;
use crate::commands::WorkflowLog;
use crate::github::ChecksApi;
use crate::reporter::{report_check_run, report_cli_error, report_failure, report_to_log};
use crate::runner::run_tool;

/// Everything a run reads, fixed before it starts.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub inputs: ActionInputs,
    pub github: GitHubContext,
}

/// Run elm-review and report its findings.
///
/// Never returns an error: every failure is reported through `log` as inline
/// errors and recorded with [`WorkflowLog::mark_failed`]. Callers decide the
/// exit status from [`WorkflowLog::failed`].
pub async fn run<W: Write>(ctx: &RunContext, checks: &dyn ChecksApi, log: &mut WorkflowLog<W>) {
    if let Err(err) = review(ctx, checks, log).await {
        tracing::debug!("run failed: {err}");
        report_failure(&err, log);
    }
}

async fn review<W: Write>(
    ctx: &RunContext,
    checks: &dyn ChecksApi,
    log: &mut WorkflowLog<W>,
) -> Result<(), ElmcheckError> {
    ctx.inputs.validate()?;

    let args = build_args(&ctx.inputs);
    let value = run_tool(&ctx.inputs.elm_review, &args, ctx.inputs.working_dir()).await?;

    let report = match ReviewReport::from_value(value)? {
        ReviewReport::CliError(err) => {
            report_cli_error(&err, log);
            return Ok(());
        }
        ReviewReport::ReviewErrors(report) => report,
    };

    let annotations = to_annotations(&report);
    tracing::info!(count = annotations.len(), "elm-review finished");

    if ctx.github.is_pull_request_from_fork() {
        tracing::info!("pull request from a fork, reporting through the job log");
        report_to_log(&annotations, log);
        return Ok(());
    }

    report_check_run(&ctx.inputs.name, &ctx.github, checks, &annotations).await
}
