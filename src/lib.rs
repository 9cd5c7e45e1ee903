//! gitpp - make GitHub repositories public or private
//!
//! gitpp flips the visibility of one or more repositories and can list the
//! authenticated user's repositories as an aligned, color-coded table.
//!
//! ## Modules
//!
//! - [`config`]: Credential file and credential resolution
//! - [`github`]: GitHub API access behind the [`RepoHost`] trait
//! - [`mode`]: Classifying a request and running it
//! - [`report`]: Table rendering
//! - [`error`]: Error kinds and their exit codes

pub mod config;
pub mod error;
pub mod github;
pub mod mode;
pub mod report;

pub use config::{ConfigStore, Credentials};
pub use error::{Error, RequestError, Result};
pub use github::{GitHubClient, ListFilter, RepoHost, RepoRef, RepoSummary, Visibility};
pub use mode::{execute, OperatingMode, Options, RunSummary};
pub use report::{ListingTotals, TableRenderer};
