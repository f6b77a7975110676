use std::path::Path;

use elmcheck_core::ElmcheckError;
use tokio::process::Command;

/// Run the review tool and parse what it printed.
///
/// A non-zero exit status is expected (elm-review exits with 1 when it finds
/// problems) and is not treated as a failure on its own. The outcome is
/// decided from the captured streams:
///
/// - any stderr output fails with [`ElmcheckError::ToolStderr`];
/// - stdout that is not JSON fails with [`ElmcheckError::ToolOutputParse`];
/// - otherwise the parsed JSON is returned without further shape checks.
///
/// # Errors
///
/// Also returns [`ElmcheckError::Io`] if the process cannot be spawned.
pub async fn run_tool(
    program: &str,
    args: &[String],
    working_dir: Option<&Path>,
) -> Result<serde_json::Value, ElmcheckError> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }

    tracing::info!(program, ?args, "running review tool");
    let output = command.output().await?;
    tracing::debug!(
        status = ?output.status,
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "review tool exited"
    );

    if !output.stderr.is_empty() {
        return Err(ElmcheckError::ToolStderr(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).map_err(|e| {
        tracing::debug!("review tool output is not JSON: {e}");
        ElmcheckError::ToolOutputParse(stdout.into_owned())
    })
}
