//! Inspection commands

use chrono::NaiveDate;

use firewatch::api::{self, CreateInspectionRequest};
use firewatch::config::Config;
use firewatch::core::models::InspectionDetails;
use firewatch::output::{OutputMode, Render};

/// Arguments for `firewatch inspect`
#[derive(Debug)]
pub struct InspectArgs {
    pub asset: String,
    pub inspection_type: String,
    pub observation: Option<String>,
    pub remarks: Option<String>,
    pub due_for_refilling: Option<NaiveDate>,
}

/// Record an inspection as the token holder
pub fn inspect(
    config: &Config,
    token: Option<&str>,
    args: InspectArgs,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let ctx = super::context(config)?;
    let req = CreateInspectionRequest {
        asset: args.asset,
        inspection_type: args.inspection_type,
        details: InspectionDetails {
            observation: args.observation,
            remarks: args.remarks,
            due_for_refilling: args.due_for_refilling,
            ..InspectionDetails::default()
        },
    };
    api::create_inspection(&ctx, token, &super::origin(), &req)?.render(mode);
    Ok(())
}

/// Print the inspection history of an asset
pub fn history(config: &Config, asset: &str, mode: OutputMode) -> anyhow::Result<()> {
    let ctx = super::context(config)?;
    api::list_inspections(&ctx, asset)?.render(mode);
    Ok(())
}
