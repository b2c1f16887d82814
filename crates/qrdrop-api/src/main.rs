use qrdrop_api::{server, setup, telemetry};
use qrdrop_core::Config;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Initialize the application (storage, services, routes, sweeper)
    let (_state, router, sweeper_handle) = setup::initialize_app(config.clone()).await?;

    // Start the server
    server::start_server(&config, router, sweeper_handle).await?;

    Ok(())
}
