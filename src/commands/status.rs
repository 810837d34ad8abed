//! Status command

use firewatch::api;
use firewatch::config::Config;
use firewatch::output::{OutputMode, Render};

/// Show an asset as the caller would see it when scanning
pub fn status(
    config: &Config,
    token: Option<&str>,
    asset: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let ctx = super::context(config)?;
    api::get_asset(&ctx, asset, token)?.render(mode);
    Ok(())
}
