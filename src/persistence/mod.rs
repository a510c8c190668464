use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::ReaderError;

const APP_NAME: &str = "readlingo";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn save_json<T: Serialize>(data: &T, file_path: &Path) -> Result<(), ReaderError> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    log::debug!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, ReaderError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    log::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(file_path: &Path) -> T {
    match load_json::<T>(file_path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", file_path.display(), e);
            T::default()
        }
    }
}

pub fn delete_data_file(file_path: &Path) -> Result<(), ReaderError> {
    if file_path.exists() {
        fs::remove_file(file_path)?;
        log::debug!("Deleted: {}", file_path.display());
    }
    Ok(())
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialFile {
    token: Option<String>,
}

/// Holds the opaque bearer credential, the only state the client keeps on disk.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    file_path: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: &Path, token_key: &str) -> Self {
        Self { file_path: dir.join(format!("{token_key}.json")) }
    }

    pub fn load(&self) -> Option<String> {
        load_json_or_default::<CredentialFile>(&self.file_path).token.filter(|t| !t.is_empty())
    }

    pub fn save(&self, token: &str) -> Result<(), ReaderError> {
        save_json(&CredentialFile { token: Some(token.to_string()) }, &self.file_path)
    }

    pub fn clear(&self) -> Result<(), ReaderError> {
        delete_data_file(&self.file_path)
    }
}
