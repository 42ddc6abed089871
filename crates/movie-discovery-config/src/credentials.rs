use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const TMDB_TOKEN_KEY: &str = "tmdb_read_token";
const APPWRITE_KEY_KEY: &str = "appwrite_api_key";
const TMDB_TOKEN_ENV: &str = "TMDB_READ_TOKEN";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    /// Catalog read-access token; the environment takes precedence over the file
    pub fn tmdb_read_token(&self) -> Option<String> {
        std::env::var(TMDB_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty())
            .or_else(|| self.get(TMDB_TOKEN_KEY).cloned())
    }

    pub fn set_tmdb_read_token(&mut self, token: String) {
        self.set(TMDB_TOKEN_KEY.to_string(), token);
    }

    pub fn appwrite_api_key(&self) -> Option<&String> {
        self.get(APPWRITE_KEY_KEY)
    }

    pub fn set_appwrite_api_key(&mut self, key: String) {
        self.set(APPWRITE_KEY_KEY.to_string(), key);
    }
}
