use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ElmcheckError;

/// The JSON report elm-review prints with `--report=json`.
///
/// The shape is chosen by the `type` tag, which is checked before any other
/// field is read.
///
/// # Examples
///
/// ```
/// use elmcheck_core::ReviewReport;
///
/// let value = serde_json::json!({ "type": "review-errors", "errors": [] });
/// let report = ReviewReport::from_value(value).unwrap();
/// assert!(matches!(report, ReviewReport::ReviewErrors(ref r) if r.errors.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewReport {
    /// The review ran and found zero or more problems.
    ReviewErrors(ReviewErrors),
    /// elm-review could not run (bad configuration, compile error, ...).
    CliError(CliError),
}

impl ReviewReport {
    /// Tag value of a successful review.
    pub const REVIEW_ERRORS_TAG: &'static str = "review-errors";
    /// Tag value of a CLI failure.
    pub const CLI_ERROR_TAG: &'static str = "error";

    /// Classify and destructure a parsed report.
    ///
    /// # Errors
    ///
    /// Returns [`ElmcheckError::UnknownReport`] if the `type` tag is missing or
    /// unknown, or [`ElmcheckError::Serialization`] if the tagged shape does not
    /// match.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ElmcheckError> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        match tag.as_deref() {
            Some(Self::REVIEW_ERRORS_TAG) => {
                Ok(Self::ReviewErrors(serde_json::from_value(value)?))
            }
            Some(Self::CLI_ERROR_TAG) => Ok(Self::CliError(serde_json::from_value(value)?)),
            _ => Err(ElmcheckError::UnknownReport(value.to_string())),
        }
    }
}

/// Problems found by a successful review, grouped per file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewErrors {
    #[serde(default)]
    pub errors: Vec<FileErrors>,
}

impl ReviewErrors {
    /// Total number of messages across all files.
    pub fn message_count(&self) -> usize {
        self.errors.iter().map(|file| file.errors.len()).sum()
    }
}

/// All messages reported for one file, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileErrors {
    pub path: String,
    #[serde(default)]
    pub errors: Vec<ReviewMessage>,
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewMessage {
    pub message: String,
    pub rule: String,
    #[serde(default)]
    pub details: Vec<String>,
    pub region: Region,
}

/// The span of a finding. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub start: Location,
    pub end: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// A failure reported by elm-review itself rather than by a rule.
///
/// Also used for failures recovered from arbitrary error text, so every field
/// is optional. `message` is normalized to a single string at parse time: a
/// plain string passes through unchanged, an array of strings is joined with
/// `\n`, and an array holding styled chunks (`{"string": ..., "color": ...}`)
/// is concatenated back into the text it renders as.
///
/// # Examples
///
/// ```
/// use elmcheck_core::CliError;
///
/// let err: CliError = serde_json::from_str(
///     r#"{"type": "error", "title": "CONFIGURATION ERROR", "message": ["first", "second"]}"#,
/// ).unwrap();
/// assert_eq!(err.message.as_deref(), Some("first\nsecond"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CliError {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "deserialize_message")]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CliError {
    /// Wrap text that could not be classified any further.
    pub fn unexpected(text: impl Into<String>) -> Self {
        Self {
            title: Some("Unexpected error".into()),
            error: Some(text.into()),
            ..Self::default()
        }
    }

    /// The text to report: `message` if present, else `error`.
    pub fn body(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

fn deserialize_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Chunk {
        Plain(String),
        Styled { string: String },
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Message {
        One(String),
        Many(Vec<Chunk>),
    }

    let Some(message) = Option::<Message>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(match message {
        Message::One(text) => text,
        Message::Many(chunks) => {
            let styled = chunks.iter().any(|c| matches!(c, Chunk::Styled { .. }));
            let parts: Vec<String> = chunks
                .into_iter()
                .map(|c| match c {
                    Chunk::Plain(s) | Chunk::Styled { string: s } => s,
                })
                .collect();
            if styled {
                parts.concat()
            } else {
                parts.join("\n")
            }
        }
    }))
}

/// Check-run annotation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Notice,
    Warning,
    Failure,
}

impl fmt::Display for AnnotationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationLevel::Notice => write!(f, "notice"),
            AnnotationLevel::Warning => write!(f, "warning"),
            AnnotationLevel::Failure => write!(f, "failure"),
        }
    }
}

/// An inline comment attached to a file range of the checked commit.
///
/// Serializes to the check-run annotation schema. Columns are only sent for
/// single-line spans; GitHub rejects them otherwise.
///
/// # Examples
///
/// ```
/// use elmcheck_core::{Annotation, AnnotationLevel};
///
/// let annotation = Annotation {
///     path: "src/Main.elm".into(),
///     start_line: 3,
///     end_line: 5,
///     start_column: None,
///     end_column: None,
///     annotation_level: AnnotationLevel::Failure,
///     title: "NoDebug.Log: Remove the use of `Debug.log`".into(),
///     message: String::new(),
/// };
/// let json = serde_json::to_value(&annotation).unwrap();
/// assert_eq!(json["annotation_level"], "failure");
/// assert!(json.get("start_column").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    pub annotation_level: AnnotationLevel,
    pub title: String,
    /// Annotation body.
    pub message: String,
}
