use std::path::Path;

use serde::Deserialize;

use crate::error::ElmcheckError;

/// The parts of a webhook event payload needed to place a check run.
///
/// Every other field of the payload is ignored. Non pull-request events
/// deserialize with `pull_request: None`.
///
/// # Examples
///
/// ```
/// use elmcheck_core::EventPayload;
///
/// let push: EventPayload = serde_json::from_str(r#"{"ref": "refs/heads/main"}"#).unwrap();
/// assert!(push.pull_request.is_none());
/// assert!(!push.is_pull_request_from_fork());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub head: GitRef,
    pub base: GitRef,
}

/// One side (head or base) of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    #[serde(default)]
    pub sha: String,
    /// `None` when the source repository has been deleted.
    #[serde(default)]
    pub repo: Option<Repository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
}

impl EventPayload {
    /// Read and parse the payload file pointed to by `GITHUB_EVENT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`ElmcheckError::Io`] if the file cannot be read, or
    /// [`ElmcheckError::Serialization`] if it is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, ElmcheckError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// `true` for a pull-request event whose head repository differs from
    /// its base repository.
    ///
    /// Non pull-request events and same-repository pull requests are never
    /// forks.
    ///
    /// # Examples
    ///
    /// ```
    /// use elmcheck_core::EventPayload;
    ///
    /// let payload: EventPayload = serde_json::from_str(r#"{
    ///     "pull_request": {
    ///         "head": { "sha": "a1", "repo": { "full_name": "fork/app" } },
    ///         "base": { "sha": "b2", "repo": { "full_name": "origin/app" } }
    ///     }
    /// }"#).unwrap();
    /// assert!(payload.is_pull_request_from_fork());
    /// ```
    pub fn is_pull_request_from_fork(&self) -> bool {
        let Some(pr) = &self.pull_request else {
            return false;
        };
        let full_name = |r: &GitRef| r.repo.as_ref().map(|repo| repo.full_name.clone());
        full_name(&pr.head) != full_name(&pr.base)
    }

    /// Head commit of the pull request, if this is a pull-request event.
    pub fn head_sha(&self) -> Option<&str> {
        self.pull_request
            .as_ref()
            .map(|pr| pr.head.sha.as_str())
            .filter(|sha| !sha.is_empty())
    }
}
