//! Workflow commands: the `::error ...::message` lines the Actions runner
//! turns into log annotations.

use std::io::Write;

/// Optional location context attached to an `::error` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationProperties {
    pub title: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub col: Option<u32>,
}

/// Writes workflow commands and remembers whether the run has failed.
///
/// Emission never fails: a broken sink is logged and otherwise ignored, since
/// the run still has to finish with the right exit status.
///
/// # Examples
///
/// ```
/// use elmcheck_review::commands::{AnnotationProperties, WorkflowLog};
///
/// let mut log = WorkflowLog::new(Vec::new());
/// log.error("bad config", &AnnotationProperties {
///     file: Some("src/Foo.elm".into()),
///     ..AnnotationProperties::default()
/// });
/// log.mark_failed();
/// assert!(log.failed());
/// assert_eq!(
///     String::from_utf8(log.into_inner()).unwrap(),
///     "::error file=src/Foo.elm::bad config\n",
/// );
/// ```
pub struct WorkflowLog<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> WorkflowLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    /// Emit one `::error` line.
    pub fn error(&mut self, message: &str, props: &AnnotationProperties) {
        let mut fields = Vec::new();
        if let Some(title) = &props.title {
            fields.push(format!("title={}", escape_property(title)));
        }
        if let Some(file) = &props.file {
            fields.push(format!("file={}", escape_property(file)));
        }
        if let Some(line) = props.line {
            fields.push(format!("line={line}"));
        }
        if let Some(col) = props.col {
            fields.push(format!("col={col}"));
        }

        let command = if fields.is_empty() {
            "::error::".to_string()
        } else {
            format!("::error {}::", fields.join(","))
        };
        if let Err(e) = writeln!(self.out, "{command}{}", escape_data(message)) {
            tracing::warn!("failed to write workflow command: {e}");
        }
    }

    /// Emit `message` as an error and mark the run as failed.
    pub fn set_failed(&mut self, message: &str) {
        self.error(message, &AnnotationProperties::default());
        self.mark_failed();
    }

    /// Mark the run as failed without emitting anything.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// `true` once anything marked the run as failed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
