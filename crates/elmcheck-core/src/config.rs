use std::path::{Path, PathBuf};

use crate::error::ElmcheckError;
use crate::event::EventPayload;

/// Default GitHub REST endpoint, used when `GITHUB_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The action's named inputs, read once at startup.
///
/// Supports layered resolution: CLI flags > `INPUT_*` env vars > defaults.
/// Multi-value inputs (`elm_files`, `ignore_dirs`) are newline-separated, the
/// way workflow files pass them.
///
/// # Examples
///
/// ```
/// use elmcheck_core::ActionInputs;
///
/// let inputs = ActionInputs::default();
/// assert_eq!(inputs.elm_review, "elm-review");
/// assert_eq!(inputs.name, "elm-review");
/// assert!(inputs.elm_files.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    /// Path to the elm-review executable.
    pub elm_review: String,
    /// Path to the review configuration directory (`--config`).
    pub elm_review_config: String,
    /// Path to the Elm compiler (`--compiler`).
    pub elm_compiler: String,
    /// Path to elm-format (`--elm-format-path`).
    pub elm_format: String,
    /// Path to `elm.json` (`--elmjson`).
    pub elm_json: String,
    /// Newline-separated files or globs to review.
    pub elm_files: String,
    /// Newline-separated directories whose errors are ignored.
    pub ignore_dirs: String,
    /// Directory to run elm-review in. Empty means the current directory.
    pub working_directory: String,
    /// Display name of the check run.
    pub name: String,
}

impl Default for ActionInputs {
    fn default() -> Self {
        Self {
            elm_review: "elm-review".into(),
            elm_review_config: String::new(),
            elm_compiler: String::new(),
            elm_format: String::new(),
            elm_json: String::new(),
            elm_files: String::new(),
            ignore_dirs: String::new(),
            working_directory: String::new(),
            name: "elm-review".into(),
        }
    }
}

impl ActionInputs {
    /// Check that the required inputs are present.
    ///
    /// # Errors
    ///
    /// Returns [`ElmcheckError::Config`] if the tool path or check name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use elmcheck_core::ActionInputs;
    ///
    /// let inputs = ActionInputs { name: "  ".into(), ..ActionInputs::default() };
    /// assert!(inputs.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ElmcheckError> {
        if self.elm_review.trim().is_empty() {
            return Err(ElmcheckError::Config(
                "input required and not supplied: elm_review".into(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ElmcheckError::Config(
                "input required and not supplied: name".into(),
            ));
        }
        Ok(())
    }

    /// The directory the tool should run in, if one was configured.
    pub fn working_dir(&self) -> Option<&Path> {
        let dir = self.working_directory.trim();
        (!dir.is_empty()).then(|| Path::new(dir))
    }
}

/// A repository identified as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse a `GITHUB_REPOSITORY` style reference.
    ///
    /// # Errors
    ///
    /// Returns [`ElmcheckError::Config`] if the value is not `owner/name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use elmcheck_core::RepoRef;
    ///
    /// let repo = RepoRef::parse("jfmengels/elm-review").unwrap();
    /// assert_eq!(repo.owner, "jfmengels");
    /// assert_eq!(repo.name, "elm-review");
    /// assert!(RepoRef::parse("no-slash").is_err());
    /// ```
    pub fn parse(full_name: &str) -> Result<Self, ElmcheckError> {
        let invalid = || {
            ElmcheckError::Config(format!(
                "invalid repository '{full_name}', expected owner/name"
            ))
        };
        let (owner, name) = full_name.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Where the run was triggered from and how to reach the GitHub API.
#[derive(Debug, Clone, Default)]
pub struct GitHubContext {
    /// `owner/name` of the repository the workflow runs in.
    pub repository: Option<String>,
    /// Commit SHA that triggered the workflow.
    pub sha: String,
    /// Parsed webhook payload of the triggering event.
    pub event: EventPayload,
    /// REST API base URL.
    pub api_url: String,
    /// Token used for check-run calls.
    pub token: Option<String>,
}

impl GitHubContext {
    /// Build the context, reading the event payload from `event_path`.
    ///
    /// A missing path or missing file yields an empty payload (e.g. when run
    /// outside of Actions).
    ///
    /// # Errors
    ///
    /// Returns [`ElmcheckError::Io`] if the event file exists but cannot be
    /// read, or [`ElmcheckError::Serialization`] if it is not valid JSON.
    pub fn load(
        repository: Option<String>,
        sha: String,
        event_path: Option<PathBuf>,
        api_url: Option<String>,
        token: Option<String>,
    ) -> Result<Self, ElmcheckError> {
        let event = match event_path {
            Some(path) if path.exists() => EventPayload::from_file(&path)?,
            _ => EventPayload::default(),
        };
        Ok(Self {
            repository: repository.filter(|r| !r.trim().is_empty()),
            sha,
            event,
            api_url: api_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// The repository check runs are reported against.
    ///
    /// # Errors
    ///
    /// Returns [`ElmcheckError::Config`] if the repository is unset or malformed.
    pub fn repo_ref(&self) -> Result<RepoRef, ElmcheckError> {
        let full_name = self.repository.as_deref().ok_or_else(|| {
            ElmcheckError::Config("GITHUB_REPOSITORY not set. Pass --repository".into())
        })?;
        RepoRef::parse(full_name)
    }

    /// Commit the check run is attached to: the PR head, else the trigger SHA.
    pub fn head_sha(&self) -> &str {
        self.event.head_sha().unwrap_or(&self.sha)
    }

    /// `true` when running for a pull request opened from a fork.
    pub fn is_pull_request_from_fork(&self) -> bool {
        self.event.is_pull_request_from_fork()
    }
}
