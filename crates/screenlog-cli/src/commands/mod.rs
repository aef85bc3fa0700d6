use color_eyre::eyre::eyre;
use color_eyre::Result;
use screenlog_api::BackendClient;
use screenlog_config::{Config, CredentialStore, PathManager};
use screenlog_core::ControllerRegistry;
use std::sync::Arc;
use tracing::debug;

pub mod config;
pub mod session;
pub mod status;
pub mod toggle;

pub(crate) fn load_config() -> Result<Config> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = if config_file.exists() {
        Config::load_from_file(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?
    } else {
        Config::default()
    };

    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;
    Ok(config)
}

/// Build a controller registry backed by the configured backend and the
/// stored access token.
pub(crate) fn connect() -> Result<ControllerRegistry> {
    let config = load_config()?;

    let path_manager = PathManager::default();
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    let token = credentials
        .get_access_token()
        .ok_or_else(|| eyre!("Not logged in. Run 'screenlog login --token <TOKEN>' first"))?
        .clone();

    debug!(base_url = %config.backend.base_url, "connecting to backend");
    let client = BackendClient::new(
        config.backend.base_url.as_str(),
        config.backend.request_timeout(),
    )
    .map_err(|e| eyre!("Failed to build backend client: {}", e))?
    .with_access_token(token);

    let client = Arc::new(client);
    Ok(ControllerRegistry::new(client.clone(), client))
}
