//! Centralized path definitions for firewatch
//!
//! ## Lookup order for the config file
//!
//! ```text
//! --config <path>                      # explicit, must exist
//! ./firewatch.toml                     # project-local
//! ~/.config/firewatch/config.toml      # user-level (XDG)
//! ```
//!
//! If none exists, built-in defaults apply.

use std::path::{Path, PathBuf};

/// Project-local config filename
pub const FIREWATCH_TOML: &str = "firewatch.toml";

/// Default JSON store filename
pub const DEFAULT_STORE_FILE: &str = "firewatch.json";

/// User-level config directory
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("firewatch")
}

/// User-level config file
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join("config.toml")
}

/// Project-local config file under `dir`
#[must_use]
pub fn local_config(dir: &Path) -> PathBuf {
    dir.join(FIREWATCH_TOML)
}

/// First existing config file, if any
#[must_use]
pub fn discover_config(cwd: &Path) -> Option<PathBuf> {
    [local_config(cwd), global_config()]
        .into_iter()
        .find(|p| p.is_file())
}
