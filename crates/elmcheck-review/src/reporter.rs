use std::io::Write;

use elmcheck_core::{Annotation, CliError, ElmcheckError, GitHubContext};

use crate::commands::{AnnotationProperties, WorkflowLog};
use crate::github::{
    CheckRunOutput, ChecksApi, Conclusion, CreateCheckRun, MAX_ANNOTATIONS_PER_REQUEST,
};

/// Check-run title when the review is clean.
pub const SUCCESS_TITLE: &str = "No problems to report";
/// Check-run summary when the review is clean.
pub const SUCCESS_SUMMARY: &str = "I found no problems while reviewing!";

/// `"1 problem found"`, `"3 problems found"`.
///
/// # Examples
///
/// ```
/// use elmcheck_review::reporter::problems_found;
///
/// assert_eq!(problems_found(1), "1 problem found");
/// assert_eq!(problems_found(12), "12 problems found");
/// ```
pub fn problems_found(count: usize) -> String {
    format!("{count} {} found", pluralize(count))
}

fn problems_summary(count: usize) -> String {
    format!("I found {count} {} while reviewing your code.", pluralize(count))
}

fn pluralize(count: usize) -> &'static str {
    if count == 1 {
        "problem"
    } else {
        "problems"
    }
}

/// Report an elm-review CLI failure as inline errors and fail the run.
///
/// The message is split on newlines and each line becomes its own `::error`,
/// all carrying the same file context.
pub fn report_cli_error<W: Write>(err: &CliError, log: &mut WorkflowLog<W>) {
    let body = err
        .body()
        .or(err.title.as_deref())
        .unwrap_or("elm-review failed without a message");
    let props = AnnotationProperties {
        title: err.title.clone(),
        file: err.path.clone(),
        ..AnnotationProperties::default()
    };
    tracing::info!(title = ?err.title, path = ?err.path, "elm-review reported an error");
    for line in body.split('\n') {
        log.error(line, &props);
    }
    log.mark_failed();
}

/// Last-resort classification of a failure that escaped the review.
///
/// The error text is re-parsed as JSON: a JSON object is treated as an
/// elm-review CLI error (stderr output is often one), anything else is wrapped
/// as an unexpected error carrying the raw text.
pub fn report_failure<W: Write>(err: &ElmcheckError, log: &mut WorkflowLog<W>) {
    let text = err.to_string();
    tracing::debug!(error = ?err, "classifying failure");
    let cli_error = match serde_json::from_str::<CliError>(&text) {
        Ok(parsed) if parsed.body().is_some() => parsed,
        Ok(parsed) => CliError {
            error: Some(text),
            ..parsed
        },
        Err(_) => CliError::unexpected(text),
    };
    report_cli_error(&cli_error, log);
}

/// Report annotations through the job log only.
///
/// Used for pull requests from forks, where the token cannot create check
/// runs. Nothing is emitted when there are no annotations.
pub fn report_to_log<W: Write>(annotations: &[Annotation], log: &mut WorkflowLog<W>) {
    if annotations.is_empty() {
        return;
    }
    for annotation in annotations {
        let text = if annotation.title.is_empty() {
            &annotation.message
        } else {
            &annotation.title
        };
        log.error(
            text,
            &AnnotationProperties {
                file: Some(annotation.path.clone()),
                line: Some(annotation.start_line),
                col: Some(annotation.start_column.unwrap_or(0)),
                ..AnnotationProperties::default()
            },
        );
    }
    log.set_failed(&problems_found(annotations.len()));
}

/// Publish the review as a completed check run.
///
/// The first [`MAX_ANNOTATIONS_PER_REQUEST`] annotations go with the create
/// call; the rest follow in order, one update per chunk, each awaited before
/// the next.
///
/// # Errors
///
/// Returns [`ElmcheckError::Config`] if the repository is unknown, or any
/// error from the [`ChecksApi`] calls.
pub async fn report_check_run(
    name: &str,
    github: &GitHubContext,
    checks: &dyn ChecksApi,
    annotations: &[Annotation],
) -> Result<(), ElmcheckError> {
    let repo = github.repo_ref()?;
    let head_sha = github.head_sha();

    if annotations.is_empty() {
        let request = CreateCheckRun::completed(
            name,
            head_sha,
            Conclusion::Success,
            CheckRunOutput {
                title: SUCCESS_TITLE.into(),
                summary: SUCCESS_SUMMARY.into(),
                annotations: Vec::new(),
            },
        );
        checks.create_check_run(&repo, &request).await?;
        tracing::info!(head_sha, "reported successful check run");
        return Ok(());
    }

    let count = annotations.len();
    let output = |chunk: &[Annotation]| CheckRunOutput {
        title: problems_found(count),
        summary: problems_summary(count),
        annotations: chunk.to_vec(),
    };

    let (first, rest) = annotations.split_at(count.min(MAX_ANNOTATIONS_PER_REQUEST));
    let request = CreateCheckRun::completed(name, head_sha, Conclusion::Failure, output(first));
    let check_run_id = checks.create_check_run(&repo, &request).await?;

    for chunk in rest.chunks(MAX_ANNOTATIONS_PER_REQUEST) {
        checks
            .update_check_run(&repo, check_run_id, &output(chunk))
            .await?;
    }
    tracing::info!(head_sha, check_run_id, count, "reported failing check run");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(log: WorkflowLog<Vec<u8>>) -> String {
        String::from_utf8(log.into_inner()).unwrap()
    }

    #[test]
    fn cli_error_lines_become_separate_errors() {
        let err = CliError {
            title: Some("ELM.JSON NOT FOUND".into()),
            path: Some("elm.json".into()),
            message: Some("I could not find elm.json\nRun elm init".into()),
            error: None,
        };
        let mut log = WorkflowLog::new(Vec::new());
        report_cli_error(&err, &mut log);
        assert!(log.failed());
        assert_eq!(
            output(log),
            "::error title=ELM.JSON NOT FOUND,file=elm.json::I could not find elm.json\n\
             ::error title=ELM.JSON NOT FOUND,file=elm.json::Run elm init\n"
        );
    }

    #[test]
    fn cli_error_without_message_uses_error_field() {
        let err = CliError {
            error: Some("spawn elm ENOENT".into()),
            ..CliError::default()
        };
        let mut log = WorkflowLog::new(Vec::new());
        report_cli_error(&err, &mut log);
        assert_eq!(output(log), "::error::spawn elm ENOENT\n");
    }

    #[test]
    fn failure_with_json_text_is_reclassified() {
        let err = ElmcheckError::ToolStderr(
            r#"{"type":"error","title":"CONFIG","path":"review/src/ReviewConfig.elm","message":["Broken"]}"#
                .into(),
        );
        let mut log = WorkflowLog::new(Vec::new());
        report_failure(&err, &mut log);
        assert!(log.failed());
        assert_eq!(
            output(log),
            "::error title=CONFIG,file=review/src/ReviewConfig.elm::Broken\n"
        );
    }

    #[test]
    fn failure_with_plain_text_is_unexpected() {
        let err = ElmcheckError::ToolOutputParse("Segmentation fault".into());
        let mut log = WorkflowLog::new(Vec::new());
        report_failure(&err, &mut log);
        assert!(log.failed());
        assert_eq!(
            output(log),
            "::error title=Unexpected error::Segmentation fault\n"
        );
    }

    #[test]
    fn failure_with_bodyless_json_keeps_raw_text() {
        let err = ElmcheckError::ToolStderr(r#"{"path":"src/A.elm"}"#.into());
        let mut log = WorkflowLog::new(Vec::new());
        report_failure(&err, &mut log);
        assert_eq!(
            output(log),
            concat!(r#"::error file=src/A.elm::{"path":"src/A.elm"}"#, "\n")
        );
    }

    #[test]
    fn fork_log_uses_title_and_location() {
        let annotation = Annotation {
            path: "src/A.elm".into(),
            start_line: 3,
            end_line: 5,
            start_column: None,
            end_column: None,
            annotation_level: elmcheck_core::AnnotationLevel::Failure,
            title: "NoDebug.Log: Remove Debug.log".into(),
            message: "body".into(),
        };
        let mut log = WorkflowLog::new(Vec::new());
        report_to_log(&[annotation], &mut log);
        assert!(log.failed());
        assert_eq!(
            output(log),
            "::error file=src/A.elm,line=3,col=0::NoDebug.Log: Remove Debug.log\n\
             ::error::1 problem found\n"
        );
    }

    #[test]
    fn fork_log_without_annotations_is_silent() {
        let mut log = WorkflowLog::new(Vec::new());
        report_to_log(&[], &mut log);
        assert!(!log.failed());
        assert!(output(log).is_empty());
    }
}
