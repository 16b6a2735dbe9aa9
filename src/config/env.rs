use crate::config::toml_config::{AppConfig, FirebaseConfig, FormConfig, SubmissionConfig};
use crate::utils::error::{AppError, Result};

pub const ENV_PROJECT_ID: &str = "FIREBASE_PROJECT_ID";
pub const ENV_API_KEY: &str = "FIREBASE_API_KEY";
pub const ENV_ENDPOINT: &str = "FIRESTORE_ENDPOINT";
pub const ENV_DATABASE: &str = "FIRESTORE_DATABASE";
pub const ENV_COLLECTION: &str = "ENROLLMENT_COLLECTION";
pub const ENV_TIMEOUT: &str = "SUBMISSION_TIMEOUT_SECONDS";
pub const ENV_SUCCESS_DISPLAY: &str = "SUCCESS_DISPLAY_SECONDS";

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 以任意查找函式建立設定，`from_env` 傳入 `std::env::var`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_id = lookup(ENV_PROJECT_ID).ok_or_else(|| AppError::MissingConfigError {
            field: ENV_PROJECT_ID.to_string(),
        })?;

        Ok(Self {
            firebase: FirebaseConfig {
                project_id,
                api_key: lookup(ENV_API_KEY).unwrap_or_default(),
                endpoint: lookup(ENV_ENDPOINT),
                database: lookup(ENV_DATABASE),
            },
            submission: SubmissionConfig {
                collection: lookup(ENV_COLLECTION),
                timeout_seconds: parse_seconds(&lookup, ENV_TIMEOUT)?,
            },
            form: FormConfig {
                success_display_seconds: parse_seconds(&lookup, ENV_SUCCESS_DISPLAY)?,
            },
        })
    }
}

fn parse_seconds<F>(lookup: &F, name: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| AppError::InvalidConfigValueError {
                    field: name.to_string(),
                    value: raw.clone(),
                    reason: format!("Expected a whole number of seconds: {}", e),
                })
        })
        .transpose()
}
