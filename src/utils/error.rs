use thiserror::Error;

/// 送出表單時給使用者看的通用訊息，不顯示任何技術細節
pub const GENERIC_SUBMISSION_NOTICE: &str =
    "Error al enviar el formulario. Por favor, intente nuevamente.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parsing failed in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl AppError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::HttpError(_) => "Could not initialise the HTTP client".to_string(),
            AppError::IoError(e) => format!("File system error: {}", e),
            AppError::SerializationError(_) => "Could not encode or decode JSON data".to_string(),
            AppError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AppError::ConfigValidationError { message, .. } => {
                format!("Configuration file could not be read: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::HttpError(_) => "Check TLS support and the submission timeout setting",
            AppError::IoError(_) => "Check that the path exists and is writable",
            AppError::SerializationError(_) => "Report this as a bug",
            AppError::MissingConfigError { .. } | AppError::InvalidConfigValueError { .. } => {
                "Set FIREBASE_PROJECT_ID and FIREBASE_API_KEY or pass --config with a valid TOML file"
            }
            AppError::ConfigValidationError { .. } => "Make sure the file is valid TOML",
        }
    }

    /// CLI 結束代碼
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => 1,
            AppError::IoError(_) => 3,
            AppError::HttpError(_) | AppError::SerializationError(_) => 4,
        }
    }
}

/// 遠端新增文件失敗。所有失敗一律視為同一類，不自動重試。
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Document store rejected the write with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from document store: {0}")]
    InvalidResponse(String),

    #[error("Document encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Document encoding failed: {0}")]
    InvalidDocument(String),
}

impl SubmissionError {
    pub fn user_friendly_message(&self) -> &'static str {
        GENERIC_SUBMISSION_NOTICE
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_errors_share_generic_notice() {
        let rejected = SubmissionError::Rejected {
            status: 403,
            message: "PERMISSION_DENIED".to_string(),
        };
        let invalid = SubmissionError::InvalidResponse("missing name".to_string());

        assert_eq!(rejected.user_friendly_message(), GENERIC_SUBMISSION_NOTICE);
        assert_eq!(invalid.user_friendly_message(), GENERIC_SUBMISSION_NOTICE);
        assert!(!rejected.user_friendly_message().contains("403"));
    }

    #[test]
    fn test_config_errors_exit_with_code_one() {
        let err = AppError::MissingConfigError {
            field: "firebase.project_id".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("firebase.project_id"));

        let invalid = AppError::InvalidConfigValueError {
            field: "submission.timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "must be between 1 and 120".to_string(),
        };
        let unparsable = AppError::ConfigValidationError {
            field: "toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert_eq!(invalid.exit_code(), 1);
        assert_eq!(unparsable.exit_code(), 1);
        assert_eq!(invalid.recovery_suggestion(), err.recovery_suggestion());
    }

    #[test]
    fn test_runtime_errors_use_distinct_exit_codes() {
        let io = AppError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let json = AppError::SerializationError(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(io.exit_code(), 3);
        assert_eq!(json.exit_code(), 4);
    }
}
