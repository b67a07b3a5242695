use anyhow::Context;
use expected_counts::{ServerConfig, StorageConfig, TableLoader, server};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let storage = StorageConfig::from_env().context("Failed to read storage configuration")?;
    let server_config = ServerConfig::from_env().context("Failed to read server configuration")?;
    info!("Reading tables from {:?} with prefix '{}'", storage.location, storage.prefix);

    let loader = TableLoader::from_config(&storage).context("Failed to open table storage")?;
    server::serve(&server_config, loader)
        .await
        .context("Server terminated")?;
    Ok(())
}
