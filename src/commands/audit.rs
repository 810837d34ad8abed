//! Audit trail command

use firewatch::api;
use firewatch::config::Config;
use firewatch::output::{OutputMode, Render};

/// Print the most recent audit entries (admin token required)
pub fn audit(
    config: &Config,
    token: Option<&str>,
    limit: Option<usize>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let ctx = super::context(config)?;
    api::list_audit(&ctx, token, limit)?.render(mode);
    Ok(())
}
