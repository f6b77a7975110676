//! Core types, configuration, and error handling for elmcheck.
//!
//! This crate provides the shared foundation used by the review crate and the
//! binary:
//! - [`ElmcheckError`] — unified error type using `thiserror`
//! - [`ActionInputs`] and [`GitHubContext`] — immutable run configuration
//! - [`EventPayload`] — the subset of the triggering webhook payload we read
//! - Report types: [`ReviewReport`], [`ReviewErrors`], [`CliError`], and the
//!   [`Annotation`] records derived from them

mod config;
mod error;
mod event;
mod types;

pub use config::{ActionInputs, GitHubContext, RepoRef, DEFAULT_API_URL};
pub use error::ElmcheckError;
pub use event::{EventPayload, GitRef, PullRequest, Repository};
pub use types::{
    Annotation, AnnotationLevel, CliError, FileErrors, Location, Region, ReviewErrors,
    ReviewMessage, ReviewReport,
};

/// A convenience `Result` type for elmcheck operations.
pub type Result<T> = std::result::Result<T, ElmcheckError>;
