//! Running elm-review in CI and reporting its findings on GitHub.
//!
//! Provides the review pipeline: command-line construction, the tool runner,
//! mapping of the JSON report to check-run annotations, and reporting through
//! either the Checks API or workflow commands.

pub mod annotations;
pub mod args;
pub mod commands;
pub mod github;
pub mod pipeline;
pub mod reporter;
pub mod runner;
