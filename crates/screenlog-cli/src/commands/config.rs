use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use screenlog_config::{Config, CredentialStore, PathManager};
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output).await,
        ConfigCommands::Init => init_config(output).await,
    }
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(&format!(
            "Configuration file not found at: {}",
            config_file.display()
        ));
        output.info("Run 'screenlog config init' to create one with defaults.");
        return Ok(());
    }

    let config = Config::load_from_file(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    let token_display = match credentials.get_access_token() {
        Some(token) if full => token.clone(),
        Some(token) => mask_string(token),
        None => "<not set>".to_string(),
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("{}", "Configuration".bright_cyan().bold());
            println!("  config file:     {}", config_file.display());
            println!("  base url:        {}", config.backend.base_url);
            println!("  request timeout: {}s", config.backend.request_timeout_secs);
            println!("  access token:    {}", token_display);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "backend": {
                    "base_url": config.backend.base_url,
                    "request_timeout_secs": config.backend.request_timeout_secs,
                },
                "access_token": token_display,
            }));
        }
    }

    Ok(())
}

async fn init_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() {
        output.warn(&format!(
            "Configuration already exists at: {}",
            config_file.display()
        ));
        return Ok(());
    }

    let config = Config::default();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(&format!(
        "Wrote default configuration to {}",
        config_file.display()
    ));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    format!("{}***{}", &s[..2], &s[s.len() - 2..])
}
