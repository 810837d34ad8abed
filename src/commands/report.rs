//! Dashboard commands

use firewatch::api;
use firewatch::config::Config;
use firewatch::output::{OutputMode, Render};

/// Print weekly inspection stats
pub fn stats(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let ctx = super::context(config)?;
    api::get_stats(&ctx)?.render(mode);
    Ok(())
}

/// Print the fleet summary
pub fn summary(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let ctx = super::context(config)?;
    api::get_summary(&ctx)?.render(mode);
    Ok(())
}
