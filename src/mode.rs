//! Turning flags into a plan and running it
//!
//! [`OperatingMode::resolve`] decides what a run does; [`execute`] carries it
//! out against a [`RepoHost`], one request at a time and stopping at the
//! first failure.

use crossterm::style::Stylize;
use std::io::Write;
use tracing::{debug, info};

use crate::error::{RequestError, Result};
use crate::github::{ListFilter, RepoHost, RepoRef, Visibility};
use crate::report::{ListingTotals, TableRenderer};

/// Everything the user asked for on the command line, minus credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Repositories to change, in the order given
    pub repo_names: Vec<String>,
    pub make_private: bool,
    pub make_public: bool,
    pub list_requested: bool,
    pub filter: ListFilter,
}

impl Options {
    /// Collect repository names, splitting on commas and dropping blanks and
    /// repeats while keeping first-seen order
    pub fn with_repo_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            for part in name.as_ref().split(',') {
                let part = part.trim();
                if !part.is_empty() && !self.repo_names.iter().any(|seen| seen == part) {
                    self.repo_names.push(part.to_string());
                }
            }
        }
        self
    }
}

/// What a run will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// List repositories and change nothing
    ListOnly,
    /// Change the visibility of the named repositories
    MutateOnly(Visibility),
    /// Change visibility, then list so the table shows the result
    MutateThenList(Visibility),
}

impl OperatingMode {
    /// Classify a request. Unrunnable combinations come back as
    /// [`RequestError`].
    pub fn resolve(options: &Options) -> Result<Self, RequestError> {
        if options.make_private && options.make_public {
            return Err(RequestError::VisibilityConflict);
        }

        if options.repo_names.is_empty() {
            return if options.list_requested {
                Ok(OperatingMode::ListOnly)
            } else {
                Err(RequestError::NothingRequested)
            };
        }

        if let Some(bad) = options.repo_names.iter().find(|name| !RepoRef::is_valid(name)) {
            return Err(RequestError::InvalidRepoName(bad.clone()));
        }

        let visibility = if options.make_private {
            Visibility::Private
        } else if options.make_public {
            Visibility::Public
        } else {
            return Err(RequestError::VisibilityMissing);
        };

        if options.list_requested {
            Ok(OperatingMode::MutateThenList(visibility))
        } else {
            Ok(OperatingMode::MutateOnly(visibility))
        }
    }

    /// Visibility to apply, if this mode changes anything
    pub fn target_visibility(self) -> Option<Visibility> {
        match self {
            OperatingMode::ListOnly => None,
            OperatingMode::MutateOnly(visibility) | OperatingMode::MutateThenList(visibility) => {
                Some(visibility)
            }
        }
    }

    pub fn lists(self) -> bool {
        matches!(self, OperatingMode::ListOnly | OperatingMode::MutateThenList(_))
    }
}

/// Result of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Repositories changed, in the order they were processed
    pub updated: Vec<RepoRef>,
    /// Present when a listing was printed
    pub listing: Option<ListingTotals>,
}

/// Run `mode` against `host`, writing confirmations and the table to `out`.
///
/// Bare repository names are owned by `owner`. Mutations happen strictly in
/// order and all of them finish before the listing request is sent. The
/// first failure ends the run.
pub async fn execute<W: Write>(
    mode: OperatingMode,
    options: &Options,
    owner: &str,
    host: &dyn RepoHost,
    renderer: &TableRenderer,
    out: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if let Some(visibility) = mode.target_visibility() {
        for name in &options.repo_names {
            let repo = RepoRef::parse(name, owner);
            debug!("Updating {} to {}", repo, visibility);

            host.set_visibility(&repo, visibility).await?;

            info!("Updated visibility of {}", repo);
            print_confirmation(&repo, visibility, renderer, out)?;
            summary.updated.push(repo);
        }
    }

    if mode.lists() {
        let repos = host.list_repositories(&options.filter).await?;
        summary.listing = Some(renderer.render(&repos, out)?);
    }

    Ok(summary)
}

fn print_confirmation<W: Write>(
    repo: &RepoRef,
    visibility: Visibility,
    renderer: &TableRenderer,
    out: &mut W,
) -> std::io::Result<()> {
    let label = if renderer.colored() {
        visibility.describe().magenta().to_string()
    } else {
        visibility.describe().to_string()
    };
    writeln!(out, "Repository {} successfully set to {}.", repo, label)?;
    writeln!(out, "Repository URL: {}", repo.html_url())
}
