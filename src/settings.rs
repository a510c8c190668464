use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::ReaderError,
    persistence::{
        get_app_data_dir,
        load_json_or_default,
        save_json,
        CredentialStore,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const API_URL_ENV: &str = "READLINGO_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub token_key: String, // File stem of the stored credential
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
            token_key: "user_".to_string(),
        }
    }
}

impl Settings {
    /// Reads `settings.json` from `dir`, then applies the environment
    /// override for the API url.
    pub fn load_from(dir: &Path) -> Self {
        let mut settings: Settings = load_json_or_default(&dir.join(SETTINGS_FILE));
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                settings.api_url = url;
            }
        }
        settings.api_url = settings.api_url.trim_end_matches('/').to_string();
        settings
    }

    pub fn save_to(&self, dir: &Path) -> Result<(), ReaderError> {
        save_json(self, &dir.join(SETTINGS_FILE))
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn credential_store(&self, dir: &Path) -> CredentialStore {
        CredentialStore::new(dir, &self.token_key)
    }

    pub fn data_dir() -> PathBuf {
        get_app_data_dir()
    }
}
