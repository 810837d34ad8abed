//! Serve command

use firewatch::config::Config;

/// Run the HTTP API until the process is stopped
#[cfg(feature = "server")]
pub fn serve(config: &Config, bind: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    use std::sync::Arc;

    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let port = port.unwrap_or(config.server.port);
    let ctx = Arc::new(super::context(config)?);

    if config.users.is_empty() {
        log::warn!("no users configured; every caller will be read-only");
    }
    log::info!(
        "lock window {}h, storage {}",
        config.access.lock_hours,
        config.storage.backend
    );
    firewatch::server::serve(ctx, &format!("{bind}:{port}"), config.server.workers)
}

/// Run the HTTP API until the process is stopped
#[cfg(not(feature = "server"))]
pub fn serve(_config: &Config, _bind: Option<String>, _port: Option<u16>) -> anyhow::Result<()> {
    anyhow::bail!("firewatch was built without the `server` feature")
}
