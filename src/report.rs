//! Aligned, color-coded repository listing
//!
//! Rows keep the order they were given in; the host's sort is the only sort.

use crossterm::style::Stylize;
use std::io::{self, Write};

use crate::github::{RepoSummary, Visibility};

const REPO_HEADER: &str = "Repository";
const VISIBILITY_HEADER: &str = "Visibility";
const RULE: &str = "----------";

/// Counts shown under the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingTotals {
    pub total: usize,
    pub private: usize,
    pub public: usize,
}

impl ListingTotals {
    pub fn from_repos(repos: &[RepoSummary]) -> Self {
        let private = repos.iter().filter(|repo| repo.is_private()).count();
        Self {
            total: repos.len(),
            private,
            public: repos.len() - private,
        }
    }
}

/// Renders repositories as a two-column table followed by totals
#[derive(Debug, Clone)]
pub struct TableRenderer {
    color: bool,
    padding: usize,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self {
            color: true,
            padding: 3,
        }
    }
}

impl TableRenderer {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn colored(&self) -> bool {
        self.color
    }

    /// Write the table for `repos` and return the totals it printed
    pub fn render<W: Write>(
        &self,
        repos: &[RepoSummary],
        out: &mut W,
    ) -> io::Result<ListingTotals> {
        let width = repos
            .iter()
            .map(|repo| repo.full_name.chars().count())
            .chain(std::iter::once(REPO_HEADER.len()))
            .max()
            .unwrap_or(REPO_HEADER.len())
            + self.padding;

        writeln!(out, "Your List Of Repository And Visibility")?;
        writeln!(out)?;
        writeln!(out, "{:<width$}{}", RULE, RULE)?;
        writeln!(out, "{:<width$}{}", REPO_HEADER, VISIBILITY_HEADER)?;
        writeln!(out, "{:<width$}{}", RULE, RULE)?;

        for repo in repos {
            writeln!(
                out,
                "{:<width$}{}",
                repo.full_name,
                self.visibility_label(repo.visibility)
            )?;
        }

        let totals = ListingTotals::from_repos(repos);
        writeln!(out)?;
        writeln!(
            out,
            "{} {} {} {} {} {}",
            self.summary_label("Total Repo:"),
            totals.total,
            self.summary_label("Private Repo:"),
            totals.private,
            self.summary_label("Public Repo:"),
            totals.public
        )?;

        Ok(totals)
    }

    /// Visibility label, red for private and blue for public
    pub fn visibility_label(&self, visibility: Visibility) -> String {
        let label = visibility.describe();
        if !self.color {
            return label.to_string();
        }
        match visibility {
            Visibility::Private => label.red().to_string(),
            Visibility::Public => label.blue().to_string(),
        }
    }

    fn summary_label(&self, label: &str) -> String {
        if self.color {
            label.cyan().to_string()
        } else {
            label.to_string()
        }
    }
}
