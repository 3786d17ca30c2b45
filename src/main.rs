//! Attendance kiosk HTTP server.

use std::env;
use std::error::Error;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attendance_kiosk::api::{AppState, create_router};
use attendance_kiosk::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("KIOSK_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let mut config = ConfigLoader::load(&config_dir)?;
    if let Ok(hash) = env::var("KIOSK_ADMIN_PASSWORD_HASH") {
        config = config.with_admin_password_hash(hash);
    }

    let state = AppState::from_config(&config);
    let admin_enabled = state.auth().read().await.is_enabled();
    let bind_address = config.server().bind_address.clone();

    let listener = TcpListener::bind(&bind_address).await?;
    info!(
        config_dir = %config_dir,
        address = %bind_address,
        admin_enabled,
        "Attendance kiosk listening"
    );

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
