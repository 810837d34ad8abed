//! Asset management commands

use firewatch::api::{self, CreateAssetRequest};
use firewatch::config::Config;
use firewatch::output::{OperationResult, OutputMode, Render};

use crate::cli::AssetAction;

/// Handle `firewatch asset <action>`
pub fn asset(
    config: &Config,
    token: Option<&str>,
    action: AssetAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let ctx = super::context(config)?;
    match action {
        AssetAction::Add {
            serial,
            kind,
            capacity,
            location,
            make,
            year,
        } => {
            let req = CreateAssetRequest {
                serial_number: serial,
                kind,
                capacity,
                year_of_manufacture: year,
                make,
                location,
            };
            api::create_asset(&ctx, token, &super::origin(), &req)?.render(mode);
        },
        AssetAction::List => api::list_assets(&ctx)?.render(mode),
        AssetAction::Remove { asset } => {
            let deleted = api::delete_asset(&ctx, &asset, token, &super::origin())?;
            OperationResult::ok(format!("Retired asset {}", deleted.id)).render(mode);
        },
    }
    Ok(())
}
