#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

pub use toml_config::{AppConfig, FirebaseConfig, FormConfig, SubmissionConfig};

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// 有指定檔案就讀 TOML，否則讀環境變數；兩者都會經過驗證
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            AppConfig::from_file(path)?
        }
        None => {
            tracing::info!("📁 Loading configuration from environment");
            AppConfig::from_env()?
        }
    };

    config.validate()?;
    Ok(config)
}
