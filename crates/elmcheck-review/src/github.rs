use async_trait::async_trait;
use elmcheck_core::{Annotation, ElmcheckError, RepoRef};
use serde::{Deserialize, Serialize};

/// GitHub accepts at most this many annotations per check-run request.
pub const MAX_ANNOTATIONS_PER_REQUEST: usize = 50;

/// Final state of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
}

/// The `output` object of a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    pub annotations: Vec<Annotation>,
}

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
///
/// # Examples
///
/// ```
/// use elmcheck_review::github::{CheckRunOutput, Conclusion, CreateCheckRun};
///
/// let request = CreateCheckRun::completed(
///     "elm-review",
///     "abc123",
///     Conclusion::Success,
///     CheckRunOutput {
///         title: "No problems to report".into(),
///         summary: "I found no problems while reviewing!".into(),
///         annotations: vec![],
///     },
/// );
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["status"], "completed");
/// assert_eq!(json["conclusion"], "success");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCheckRun {
    pub name: String,
    pub head_sha: String,
    pub status: String,
    pub conclusion: Conclusion,
    pub output: CheckRunOutput,
}

impl CreateCheckRun {
    /// A check run that is created already finished.
    pub fn completed(
        name: impl Into<String>,
        head_sha: impl Into<String>,
        conclusion: Conclusion,
        output: CheckRunOutput,
    ) -> Self {
        Self {
            name: name.into(),
            head_sha: head_sha.into(),
            status: "completed".into(),
            conclusion,
            output,
        }
    }
}

/// The check-run endpoints the reporter needs.
///
/// Implemented by [`GitHubClient`]; tests substitute a recording fake.
#[async_trait]
pub trait ChecksApi: Send + Sync {
    /// Create a check run and return its id.
    async fn create_check_run(
        &self,
        repo: &RepoRef,
        request: &CreateCheckRun,
    ) -> Result<u64, ElmcheckError>;

    /// Replace the output of an existing check run, appending its annotations.
    async fn update_check_run(
        &self,
        repo: &RepoRef,
        check_run_id: u64,
        output: &CheckRunOutput,
    ) -> Result<(), ElmcheckError>;
}

/// GitHub check-run client backed by `octocrab`.
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
}

#[derive(Deserialize)]
struct CheckRunCreated {
    id: u64,
}

impl GitHubClient {
    /// Create a client for the API at `api_url`.
    ///
    /// Without a token the client is anonymous and check-run calls will be
    /// rejected by the API.
    ///
    /// # Errors
    ///
    /// Returns [`ElmcheckError::Config`] if `api_url` is not a valid URI, or
    /// [`ElmcheckError::GitHub`] if the client cannot be built.
    pub fn new(token: Option<&str>, api_url: &str) -> Result<Self, ElmcheckError> {
        let mut builder = octocrab::Octocrab::builder()
            .base_uri(api_url)
            .map_err(|e| ElmcheckError::Config(format!("invalid GitHub API URL '{api_url}': {e}")))?;
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        let octocrab = builder
            .build()
            .map_err(|e| ElmcheckError::GitHub(format!("failed to create GitHub client: {e}")))?;

        Ok(Self { octocrab })
    }
}

#[async_trait]
impl ChecksApi for GitHubClient {
    async fn create_check_run(
        &self,
        repo: &RepoRef,
        request: &CreateCheckRun,
    ) -> Result<u64, ElmcheckError> {
        let route = format!("/repos/{}/{}/check-runs", repo.owner, repo.name);
        let created: CheckRunCreated = self
            .octocrab
            .post(route, Some(request))
            .await
            .map_err(|e| ElmcheckError::GitHub(format!("failed to create check run: {e}")))?;
        tracing::debug!(check_run_id = created.id, "created check run");
        Ok(created.id)
    }

    async fn update_check_run(
        &self,
        repo: &RepoRef,
        check_run_id: u64,
        output: &CheckRunOutput,
    ) -> Result<(), ElmcheckError> {
        let route = format!(
            "/repos/{}/{}/check-runs/{check_run_id}",
            repo.owner, repo.name
        );
        let body = serde_json::json!({ "output": output });
        let _response: serde_json::Value = self
            .octocrab
            .patch(route, Some(&body))
            .await
            .map_err(|e| ElmcheckError::GitHub(format!("failed to update check run: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elmcheck_core::AnnotationLevel;

    #[test]
    fn create_request_serializes_output() {
        let request = CreateCheckRun::completed(
            "elm-review",
            "deadbeef",
            Conclusion::Failure,
            CheckRunOutput {
                title: "1 problem found".into(),
                summary: "I found 1 problem while reviewing your code.".into(),
                annotations: vec![Annotation {
                    path: "src/A.elm".into(),
                    start_line: 1,
                    end_line: 2,
                    start_column: None,
                    end_column: None,
                    annotation_level: AnnotationLevel::Failure,
                    title: "Rule: message".into(),
                    message: "details".into(),
                }],
            },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "elm-review");
        assert_eq!(json["head_sha"], "deadbeef");
        assert_eq!(json["conclusion"], "failure");
        assert_eq!(json["output"]["annotations"][0]["path"], "src/A.elm");
        assert!(json["output"]["annotations"][0].get("start_column").is_none());
    }

    #[tokio::test]
    async fn client_construction_succeeds() {
        let client = GitHubClient::new(Some("ghp_test"), "https://api.github.com");
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn invalid_api_url_is_config_error() {
        let result = GitHubClient::new(None, "not a url");
        assert!(matches!(result, Err(ElmcheckError::Config(_))));
    }
}
