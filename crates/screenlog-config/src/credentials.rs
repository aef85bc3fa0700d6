use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;

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

    // Convenience methods for specific credentials
    pub fn get_access_token(&self) -> Option<&String> {
        self.get("access_token")
    }

    pub fn set_access_token(&mut self, token: String) {
        self.set("access_token".to_string(), token);
    }

    pub fn clear_access_token(&mut self) {
        self.remove("access_token");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_access_token("test_token".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(
            loaded_store.get_access_token(),
            Some(&"test_token".to_string())
        );
    }

    #[test]
    fn test_credential_store_load_missing_file_is_empty() {
        let mut store = CredentialStore::new(PathBuf::from("/nonexistent/credentials.toml"));
        store.load().unwrap();
        assert_eq!(store.get_access_token(), None);
    }

    #[test]
    fn test_credential_store_clear_access_token() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_access_token("token".to_string());
        store.set("other_key".to_string(), "value".to_string());

        store.clear_access_token();
        assert_eq!(store.get_access_token(), None);
        assert_eq!(store.get("other_key"), Some(&"value".to_string()));
    }
}
