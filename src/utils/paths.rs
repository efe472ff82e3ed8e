use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".finance_control";
const HOME_ENV: &str = "FINANCE_CONTROL_HOME";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "finance.json";

/// Returns the application data directory, defaulting to `~/.finance_control`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Record snapshot used when the configuration names no data file.
pub fn default_data_file_in(base: &std::path::Path) -> PathBuf {
    base.join(DATA_FILE)
}
