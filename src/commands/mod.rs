//! Command implementations

mod asset;
mod audit;
mod init;
mod inspect;
mod report;
mod serve;
mod status;

use std::sync::Arc;

use firewatch::api::AppContext;
use firewatch::config::Config;
use firewatch::core::models::RequestOrigin;

pub use asset::asset;
pub use audit::audit;
pub use init::init;
pub use inspect::{InspectArgs, history, inspect};
pub use report::{stats, summary};
pub use serve::serve;
pub use status::status;

/// Wire the configured store and users into a handler context
fn context(config: &Config) -> anyhow::Result<AppContext> {
    let store = Arc::new(config.open_store()?);
    let directory = Arc::new(config.directory());
    Ok(AppContext::new(store, directory, config.lock_policy()))
}

/// Audit origin for writes made from this CLI
fn origin() -> RequestOrigin {
    RequestOrigin {
        ip_address: None,
        device_info: Some(format!("firewatch-cli/{}", firewatch::VERSION)),
    }
}
