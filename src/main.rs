use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use elmcheck_core::{ActionInputs, GitHubContext};
use elmcheck_review::commands::WorkflowLog;
use elmcheck_review::github::GitHubClient;
use elmcheck_review::pipeline::{self, RunContext};
use elmcheck_review::reporter::report_failure;
use miette::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "elmcheck",
    version,
    about = "Run elm-review in CI and report problems on GitHub",
    long_about = "Runs elm-review with a JSON report and turns its findings into GitHub annotations.\n\n\
                   On pushes and same-repository pull requests, findings are published as a\n\
                   check run. On pull requests from forks, where the token cannot write checks,\n\
                   they are printed as workflow `::error` commands instead.\n\n\
                   Every input can also be given through the `INPUT_*` variables GitHub Actions sets.\n\n\
                   Examples:\n  \
                     elmcheck                                   Review with defaults\n  \
                     elmcheck --elm-files 'src/'                Review only src/\n  \
                     elmcheck --elm-review node_modules/.bin/elm-review --name lint"
)]
struct Cli {
    /// Path to the elm-review executable
    #[arg(long, env = "INPUT_ELM_REVIEW", default_value = "elm-review")]
    elm_review: String,

    /// Path to the review configuration directory (--config)
    #[arg(long, env = "INPUT_ELM_REVIEW_CONFIG", default_value = "")]
    elm_review_config: String,

    /// Path to the Elm compiler (--compiler)
    #[arg(long, env = "INPUT_ELM_COMPILER", default_value = "")]
    elm_compiler: String,

    /// Path to elm-format (--elm-format-path)
    #[arg(long, env = "INPUT_ELM_FORMAT", default_value = "")]
    elm_format: String,

    /// Path to elm.json (--elmjson)
    #[arg(long, env = "INPUT_ELM_JSON", default_value = "")]
    elm_json: String,

    /// Files or globs to review, one per line
    #[arg(long, env = "INPUT_ELM_FILES", default_value = "")]
    elm_files: String,

    /// Directories to ignore, one per line
    #[arg(long, env = "INPUT_IGNORE_DIRS", default_value = "")]
    ignore_dirs: String,

    /// Directory to run elm-review in
    #[arg(long, env = "INPUT_WORKING_DIRECTORY", default_value = "")]
    working_directory: String,

    /// Display name of the check run
    #[arg(long, env = "INPUT_NAME", default_value = "elm-review")]
    name: String,

    /// Token used to create check runs
    #[arg(
        long,
        env = "INPUT_REPO_TOKEN",
        hide_env_values = true,
        long_help = "Token used to create check runs.\n\nFalls back to GITHUB_TOKEN. Needs `checks: write`."
    )]
    repo_token: Option<String>,

    /// Repository to report on (owner/name)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Commit that triggered the workflow
    #[arg(long, env = "GITHUB_SHA", default_value = "")]
    sha: String,

    /// Path to the webhook event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Enable verbose diagnostics on stderr
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn inputs(&self) -> ActionInputs {
        ActionInputs {
            elm_review: self.elm_review.clone(),
            elm_review_config: self.elm_review_config.clone(),
            elm_compiler: self.elm_compiler.clone(),
            elm_format: self.elm_format.clone(),
            elm_json: self.elm_json.clone(),
            elm_files: self.elm_files.clone(),
            ignore_dirs: self.ignore_dirs.clone(),
            working_directory: self.working_directory.clone(),
            name: self.name.clone(),
        }
    }

    fn token(&self) -> Option<String> {
        self.repo_token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))?;
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut log = WorkflowLog::new(std::io::stdout().lock());

    let setup = GitHubContext::load(
        cli.repository.clone(),
        cli.sha.clone(),
        cli.event_path.clone(),
        cli.api_url.clone(),
        cli.token(),
    )
    .and_then(|github| {
        let client = GitHubClient::new(github.token.as_deref(), &github.api_url)?;
        Ok((github, client))
    });

    match setup {
        Ok((github, client)) => {
            let ctx = RunContext {
                inputs: cli.inputs(),
                github,
            };
            pipeline::run(&ctx, &client, &mut log).await;
        }
        Err(err) => report_failure(&err, &mut log),
    }

    let failed = log.failed();
    let _ = log.into_inner().flush();
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
