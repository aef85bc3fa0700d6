use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use screenlog_config::{CredentialStore, PathManager};

pub async fn run_login(token: String, output: &Output) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(eyre!("Token cannot be empty"));
    }

    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create config directory: {}", e))?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    credentials.set_access_token(token.to_string());
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(&format!(
        "Access token stored in {}",
        path_manager.credentials_file().display()
    ));
    Ok(())
}

pub async fn run_logout(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let credentials_file = path_manager.credentials_file();

    if !credentials_file.exists() {
        output.info("No credentials stored; nothing to do");
        return Ok(());
    }

    let mut credentials = CredentialStore::new(credentials_file);
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    if credentials.get_access_token().is_none() {
        output.info("No access token stored; nothing to do");
        return Ok(());
    }

    credentials.clear_access_token();
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success("Access token removed");
    Ok(())
}
