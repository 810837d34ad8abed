//! Configuration management
//!
//! Config is a TOML file (see [`crate::paths`] for lookup order):
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0"
//! port = 8000
//! workers = 4
//!
//! [storage]
//! backend = "file"
//! path = "firewatch.json"
//!
//! [access]
//! lock_hours = 48
//!
//! [[users]]
//! username = "alice"
//! role = "inspector"
//! token = "change-me"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::adapters::{RecordStore, StorageBackend, TokenDirectory};
use crate::core::models::{DEFAULT_LOCK_HOURS, LockPolicy, Role};
use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Inspection lock settings
    #[serde(default)]
    pub access: AccessConfig,
    /// Users and their bearer tokens
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_workers() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

/// Record store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind
    #[serde(default)]
    pub backend: StorageBackend,
    /// JSON file path (file backend only)
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_STORE_FILE)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_store_path(),
        }
    }
}

/// Inspection lock settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Hours an asset stays locked after an inspection
    #[serde(default = "default_lock_hours")]
    pub lock_hours: u32,
}

const fn default_lock_hours() -> u32 {
    DEFAULT_LOCK_HOURS
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            lock_hours: default_lock_hours(),
        }
    }
}

/// A user entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Unique username
    pub username: String,
    /// Role
    #[serde(default)]
    pub role: Role,
    /// Bearer token
    pub token: String,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Config {
    /// Load config
    ///
    /// An explicit path must exist. Otherwise the first discovered file is
    /// used, falling back to defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => paths::discover_config(&std::env::current_dir()?),
        };
        match path {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            },
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.workers == 0 {
            bail!("server.workers must be at least 1");
        }
        let mut usernames = HashSet::new();
        let mut tokens = HashSet::new();
        for user in &self.users {
            if user.username.trim().is_empty() {
                bail!("user with empty username");
            }
            if user.token.trim().is_empty() {
                bail!("user {} has an empty token", user.username);
            }
            if !usernames.insert(user.username.as_str()) {
                bail!("duplicate user {}", user.username);
            }
            if !tokens.insert(user.token.as_str()) {
                bail!("token for user {} is shared with another user", user.username);
            }
        }
        Ok(())
    }

    /// Lock policy from `[access]`
    #[must_use]
    pub fn lock_policy(&self) -> LockPolicy {
        LockPolicy::from_hours(self.access.lock_hours)
    }

    /// Open the configured record store
    pub fn open_store(&self) -> anyhow::Result<RecordStore> {
        match self.storage.backend {
            StorageBackend::Memory => Ok(RecordStore::in_memory()),
            StorageBackend::File => RecordStore::open(&self.storage.path),
        }
    }

    /// Token directory from `[[users]]`
    #[must_use]
    pub fn directory(&self) -> TokenDirectory {
        let mut directory = TokenDirectory::new();
        for user in &self.users {
            directory.add_user(&user.username, user.role, &user.token, user.display_name.clone());
        }
        directory
    }
}
