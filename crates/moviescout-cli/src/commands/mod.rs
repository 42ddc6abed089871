pub mod availability;
pub mod browse;
pub mod config;
pub mod overrides;
pub mod prompts;
pub mod ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_discovery_config::{Config, CredentialStore, PathManager};
use movie_discovery_sources::Collaborators;

/// Loaded configuration plus the clients built from it
pub struct Context {
    pub config: Config,
    pub collaborators: Collaborators,
}

impl Context {
    pub fn load(paths: &PathManager, config: Config) -> Result<Self> {
        let credentials = load_credentials(paths)?;
        let collaborators = Collaborators::from_config(&config, &credentials)
            .map_err(|e| eyre!("Failed to set up clients: {}", e))?;
        Ok(Self { config, collaborators })
    }
}

pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let credentials_file = paths.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(store)
}
