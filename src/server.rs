use crate::config::Config;
use crate::core_network::network;
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

/// Runs the share server with the provided configuration.
///
/// The shared root is validated and canonicalized before anything is bound,
/// so a bad root or a port already in use ends the process at startup.
///
/// # Returns
///
/// Result<(), anyhow::Error> indicating the success or failure of the operation.
pub async fn run(config: Config) -> Result<()> {
    let root_folder = config.server.validate()?;
    info!("Starting server with config: {:?}", config.server);
    info!("Sharing {:?}", root_folder);

    if let Err(e) = network::start_server(Arc::new(config), Arc::new(root_folder)).await {
        error!("Failed to start server: {:#}", e);
        return Err(e);
    }

    Ok(())
}
