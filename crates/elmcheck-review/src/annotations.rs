use elmcheck_core::{Annotation, AnnotationLevel, ReviewErrors, ReviewMessage};

/// Column at which annotation bodies are wrapped.
pub const WRAP_WIDTH: usize = 80;

/// Flatten a review into check-run annotations, one per message, in report
/// order.
///
/// # Examples
///
/// ```
/// use elmcheck_core::ReviewErrors;
/// use elmcheck_review::annotations::to_annotations;
///
/// assert!(to_annotations(&ReviewErrors::default()).is_empty());
/// ```
pub fn to_annotations(report: &ReviewErrors) -> Vec<Annotation> {
    report
        .errors
        .iter()
        .flat_map(|file| file.errors.iter().map(|msg| annotation(&file.path, msg)))
        .collect()
}

fn annotation(path: &str, msg: &ReviewMessage) -> Annotation {
    let region = msg.region;
    let single_line = region.start.line == region.end.line;
    Annotation {
        path: path.to_string(),
        start_line: region.start.line,
        end_line: region.end.line,
        start_column: single_line.then_some(region.start.column),
        end_column: single_line.then_some(region.end.column),
        annotation_level: AnnotationLevel::Failure,
        title: format!("{}: {}", msg.rule, msg.message),
        message: textwrap::fill(&msg.details.join("\n\n"), WRAP_WIDTH),
    }
}
