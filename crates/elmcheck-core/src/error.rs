/// Errors that can occur while running elm-review and reporting its results.
///
/// Library crates use this type directly; the binary crate converts to
/// `miette::Report` at the boundary.
///
/// [`ElmcheckError::ToolStderr`] and [`ElmcheckError::ToolOutputParse`] display
/// the captured text verbatim. The reporter re-parses that text as JSON when
/// classifying a failure, so no prefix may be added to either.
///
/// # Examples
///
/// ```
/// use elmcheck_core::ElmcheckError;
///
/// let err = ElmcheckError::Config("missing check name".into());
/// assert!(err.to_string().contains("missing check name"));
///
/// let raw = ElmcheckError::ToolOutputParse("not json".into());
/// assert_eq!(raw.to_string(), "not json");
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ElmcheckError {
    /// Filesystem or process I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The review tool wrote to stderr.
    #[error("{0}")]
    ToolStderr(String),

    /// The review tool's stdout was not valid JSON.
    #[error("{0}")]
    ToolOutputParse(String),

    /// The review tool produced JSON that is neither known report shape.
    #[error("unrecognized elm-review report: {0}")]
    UnknownReport(String),

    /// GitHub API failure.
    #[error("GitHub API error: {0}")]
    GitHub(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
