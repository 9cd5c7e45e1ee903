use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// GitHub identity used for every API call
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// GitHub username, also the default owner for bare repository names
    #[serde(default)]
    pub username: String,

    /// Personal access token
    #[serde(default)]
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Both fields are filled in. A half-filled pair counts as absent.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.token.is_empty()
    }

    /// Pick the credentials for this run.
    ///
    /// Flag values win outright when both are given; the config file is not
    /// read at all in that case. Otherwise the stored pair is used, and an
    /// incomplete result is reported as [`Error::CredentialsMissing`].
    pub fn resolve(
        username: Option<&str>,
        token: Option<&str>,
        store: &ConfigStore,
    ) -> Result<Self> {
        let flags = Self::new(username.unwrap_or_default(), token.unwrap_or_default());

        if flags.is_complete() {
            warn!("Kindly use the config file [{}]", store.path().display());
            return Ok(flags);
        }

        let stored = store.load()?;
        if stored.is_complete() {
            debug!("Using credentials for {} from config file", stored.username);
            Ok(stored)
        } else {
            Err(Error::CredentialsMissing {
                path: store.path().to_path_buf(),
            })
        }
    }
}

/// On-disk JSON record holding the username and token
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_config_path()?))
    }

    /// Get the default configuration file path (XDG compliant)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().ok_or_else(|| Error::Config {
            path: PathBuf::from("~/.config/gitpp/config.json"),
            message: "failed to get user config directory".to_string(),
        })?;

        Ok(config_dir.join("gitpp").join("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory and an empty record on first use.
    ///
    /// An existing file is left untouched, whatever it contains.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                self.config_error(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        self.save(&Credentials::default())?;
        info!("Created empty config file at: {:?}", self.path);
        Ok(())
    }

    /// Read the stored credentials, creating an empty record if none exists.
    ///
    /// Unreadable or unparsable content is reported as [`Error::Config`].
    pub fn load(&self) -> Result<Credentials> {
        self.ensure_exists()?;

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| self.config_error(format!("failed to read: {}", e)))?;

        let credentials: Credentials = serde_json::from_str(&content)
            .map_err(|e| self.config_error(format!("failed to parse: {}", e)))?;

        Ok(credentials)
    }

    /// Write credentials as pretty-printed JSON
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        credentials
            .serialize(&mut serializer)
            .map_err(|e| self.config_error(format!("failed to serialize: {}", e)))?;

        std::fs::write(&self.path, buf)
            .map_err(|e| self.config_error(format!("failed to write: {}", e)))?;

        Ok(())
    }

    fn config_error(&self, message: String) -> Error {
        Error::Config {
            path: self.path.clone(),
            message,
        }
    }
}
