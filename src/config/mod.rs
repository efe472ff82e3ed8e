//! Persistent user preferences.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::errors::{FinanceError, Result};
use crate::storage::json_backend::{tmp_path, write_atomic};
use crate::utils::paths;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            data_file: None,
        }
    }
}

impl Config {
    /// Updates one setting by key, as typed in the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "locale" if !value.is_empty() => self.locale = value.to_string(),
            "currency" if value.len() == 3 => self.currency = value.to_ascii_uppercase(),
            "currency" => {
                return Err(FinanceError::Config(format!(
                    "currency must be a three-letter code, got `{value}`"
                )))
            }
            "data_file" | "data-file" => {
                self.data_file = (!value.is_empty()).then(|| PathBuf::from(value))
            }
            other => {
                return Err(FinanceError::Config(format!(
                    "unknown or empty setting `{other}`"
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Record snapshot to open: the configured file, or the default one
    /// inside the application directory.
    pub fn data_file(&self, config: &Config) -> PathBuf {
        config
            .data_file
            .clone()
            .unwrap_or_else(|| paths::default_data_file_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_brazilian_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config.locale, "pt-BR");
        assert_eq!(config.currency, "BRL");
        assert_eq!(manager.data_file(&config), temp.path().join("finance.json"));
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let mut config = Config::default();
        config.set("currency", "usd").expect("currency");
        config.set("locale", "en-US").expect("locale");
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("load"), config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_currency() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
        assert!(config.set("currency", "reais").is_err());
        assert_eq!(config.currency, "BRL");
    }
}
