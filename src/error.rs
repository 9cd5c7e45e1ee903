//! Error types shared by the library
//!
//! Every variant is fatal for the current invocation. The binary maps each
//! kind onto its own process exit code via [`Error::exit_code`].

use std::path::PathBuf;

/// Convenience alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while resolving credentials, classifying a request or
/// talking to GitHub
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file exists but could not be read or parsed
    #[error("config file {} is unusable: {message}. Fix or delete it and try again", .path.display())]
    Config { path: PathBuf, message: String },

    /// Neither flags nor the config file produced a username and token
    #[error("no credentials found. Go edit {} or run with -h/--help for help", .path.display())]
    CredentialsMissing { path: PathBuf },

    /// The combination of flags does not describe a runnable request
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    /// Any failure reported by the GitHub API or the transport under it
    #[error("{context}: {source}")]
    Host {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failure writing output
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a flag combination was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("nothing to do: pass --repo with --public/--private, or --list. Run -h/--help for help")]
    NothingRequested,

    #[error("please specify --private or --public for the given repositories. Run -h/--help for help")]
    VisibilityMissing,

    #[error("--private and --public are mutually exclusive")]
    VisibilityConflict,

    #[error("invalid repository name {0:?}: expected name or owner/name")]
    InvalidRepoName(String),
}

impl Error {
    /// Wrap a host failure with a short description of what was attempted
    pub fn host(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Host {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Process exit code for this kind of failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::InvalidRequest(_) => 2,
            Error::Config { .. } => 3,
            Error::CredentialsMissing { .. } => 4,
            Error::Host { .. } => 5,
            Error::Io(_) => 1,
        }
    }
}
