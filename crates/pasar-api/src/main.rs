use pasar_api::{build_router, server, telemetry, AppState};
use pasar_core::Config;
use pasar_storage::DiskStore;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env if present, then configuration
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = Config::from_env()?;

    let store = DiskStore::new(
        config.storage_root.clone(),
        config.public_base_url.clone(),
        config.upload_policy(),
    )
    .await?;

    let state = AppState::new(config.clone(), store);
    let router = build_router(state);

    server::start_server(&config, router).await?;

    Ok(())
}
