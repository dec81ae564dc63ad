//! Barn Identity Service binary.
//! Reads configuration from a TOML file
//! (default `~/.config/barn-identity/config.toml`).

use tracing::error;

use barn_identity::{default_config_path, init_tracing, AppConfig, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("BARN_IDENTITY_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            tracing::info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config: app_cfg,
        auto_migrate: true,
    })
    .await?;

    handle.install_signal_handler();
    handle.wait().await;

    Ok(())
}
