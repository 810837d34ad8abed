//! Init command

use std::path::{Path, PathBuf};

use uuid::Uuid;

use firewatch::config::{Config, UserConfig};
use firewatch::core::models::Role;
use firewatch::output::{OperationResult, OutputMode, Render};
use firewatch::paths;

/// Write a starter config with a freshly generated admin token
pub fn init(path: Option<&Path>, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let path = path.map_or_else(|| PathBuf::from(paths::FIREWATCH_TOML), Path::to_path_buf);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let token = Uuid::new_v4().simple().to_string();
    let config = Config {
        users: vec![UserConfig {
            username: "admin".to_string(),
            role: Role::Admin,
            token: token.clone(),
            display_name: None,
        }],
        ..Config::default()
    };
    config.save(&path)?;

    OperationResult::ok(format!(
        "Wrote {}\nAdmin token: {token}\nKeep it secret; pass it with --token or an Authorization: Bearer header.",
        path.display()
    ))
    .render(mode);
    Ok(())
}
