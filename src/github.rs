use async_trait::async_trait;
use octocrab::models::Repository;
use octocrab::Octocrab;
use std::fmt;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::error::{Error, Result};

/// Repository visibility on GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn from_private(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    /// Value of the API's `private` field
    pub fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }

    /// Display label
    pub fn describe(self) -> &'static str {
        match self {
            Visibility::Private => "Private",
            Visibility::Public => "Public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The two fields of a listed repository the report needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSummary {
    pub full_name: String,
    pub visibility: Visibility,
}

impl RepoSummary {
    pub fn new(full_name: impl Into<String>, private: bool) -> Self {
        Self {
            full_name: full_name.into(),
            visibility: Visibility::from_private(private),
        }
    }

    pub fn is_private(&self) -> bool {
        self.visibility.is_private()
    }

    fn from_repository(repo: &Repository) -> Self {
        let full_name = repo.full_name.clone().unwrap_or_else(|| repo.name.clone());
        let private = reported_private(repo.private, repo.visibility.as_deref())
            .unwrap_or_else(|| {
                debug!("No visibility reported for {}, counting it as public", full_name);
                false
            });
        Self::new(full_name, private)
    }
}

/// Private flag from a listing entry. Older payloads may only carry the
/// `visibility` string, where anything but `public` is hidden from the world.
fn reported_private(private: Option<bool>, visibility: Option<&str>) -> Option<bool> {
    private.or_else(|| visibility.map(|visibility| visibility != "public"))
}

/// Query parameters for listing, passed to GitHub as given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    /// `created`, `updated`, `pushed` or `full_name`
    pub sort: String,
    /// `all`, `public` or `private`
    pub visibility: String,
    /// `owner`, `collaborator` or `organization_member`
    pub affiliation: String,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            sort: "updated".to_string(),
            visibility: "all".to_string(),
            affiliation: "owner".to_string(),
        }
    }
}

/// A repository to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// `name` or `owner/name` with no empty parts. GitHub names never
    /// contain a slash.
    pub fn is_valid(input: &str) -> bool {
        match input.split_once('/') {
            Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
            None => !input.is_empty(),
        }
    }

    /// Parse `owner/name`, or a bare `name` owned by `default_owner`.
    /// Expects input that passed [`RepoRef::is_valid`].
    pub fn parse(input: &str, default_owner: &str) -> Self {
        match input.split_once('/') {
            Some((owner, name)) => Self {
                owner: owner.to_string(),
                name: name.to_string(),
            },
            None => Self {
                owner: default_owner.to_string(),
                name: input.to_string(),
            },
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Operations the tool needs from the repository host
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Set the repository's visibility to exactly `visibility`
    async fn set_visibility(&self, repo: &RepoRef, visibility: Visibility) -> Result<()>;

    /// List the authenticated user's repositories in the order GitHub returns them
    async fn list_repositories(&self, filter: &ListFilter) -> Result<Vec<RepoSummary>>;
}

/// GitHub client wrapper authenticated with a personal access token
pub struct GitHubClient {
    client: Octocrab,
    username: String,
}

impl GitHubClient {
    /// Build a client from resolved credentials. No request is made here.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(credentials.token.clone())
            .build()
            .map_err(|e| Error::host("Failed to create GitHub client", e))?;

        debug!("GitHub client ready for user: {}", credentials.username);

        Ok(Self {
            client,
            username: credentials.username.clone(),
        })
    }

    /// Get the configured username
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn set_visibility(&self, repo: &RepoRef, visibility: Visibility) -> Result<()> {
        debug!("Setting {} to {}", repo, visibility);

        let route = format!("/repos/{}/{}", repo.owner, repo.name);
        let body = serde_json::json!({ "private": visibility.is_private() });

        let _updated: Repository = self
            .client
            .patch(route, Some(&body))
            .await
            .map_err(|e| {
                Error::host(format!("Error updating repository visibility for {}", repo), e)
            })?;

        Ok(())
    }

    async fn list_repositories(&self, filter: &ListFilter) -> Result<Vec<RepoSummary>> {
        debug!(
            "Listing repositories (sort={}, visibility={}, affiliation={})",
            filter.sort, filter.visibility, filter.affiliation
        );

        let page = self
            .client
            .current()
            .list_repos_for_authenticated_user()
            .sort(filter.sort.clone())
            .visibility(filter.visibility.clone())
            .affiliation(filter.affiliation.clone())
            .send()
            .await
            .map_err(|e| Error::host("Error listing repositories", e))?;

        let repositories: Vec<RepoSummary> =
            page.items.iter().map(RepoSummary::from_repository).collect();

        info!("Found {} repositories", repositories.len());
        Ok(repositories)
    }
}
