use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path_segment, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_COLLECTION: &str = crate::core::submission::DEFAULT_COLLECTION;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_SUCCESS_DISPLAY_SECONDS: u64 = 5;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

/// 唯一一組連線與表單設定，由外部注入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub form: FormConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub project_id: String,
    #[serde(default)]
    pub api_key: String,
    pub endpoint: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub collection: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    pub success_display_seconds: Option<u64>,
}

impl FirebaseConfig {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }
}

impl AppConfig {
    pub fn new(firebase: FirebaseConfig) -> Self {
        Self {
            firebase,
            submission: SubmissionConfig::default(),
            form: FormConfig::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FIREBASE_API_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn collection(&self) -> &str {
        self.submission
            .collection
            .as_deref()
            .unwrap_or(DEFAULT_COLLECTION)
    }

    pub fn submission_timeout(&self) -> Duration {
        Duration::from_secs(
            self.submission
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn success_window(&self) -> Duration {
        Duration::from_secs(
            self.form
                .success_display_seconds
                .unwrap_or(DEFAULT_SUCCESS_DISPLAY_SECONDS),
        )
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path_segment("firebase.project_id", &self.firebase.project_id)?;
        validate_url("firebase.endpoint", self.firebase.endpoint())?;
        validate_path_segment("firebase.database", self.firebase.database())?;
        validate_path_segment("submission.collection", self.collection())?;

        if let Some(timeout) = self.submission.timeout_seconds {
            validate_range("submission.timeout_seconds", timeout, 1, 120)?;
        }
        if let Some(window) = self.form.success_display_seconds {
            validate_range("form.success_display_seconds", window, 1, 60)?;
        }

        if validate_non_empty_string("firebase.api_key", &self.firebase.api_key).is_err() {
            tracing::warn!("⚠️ firebase.api_key is empty, requests will be sent without a key");
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
