use thiserror::Error;

#[derive(Error, Debug)]
pub enum DwhError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration parsing failed ({field}): {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration key: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Rendering error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Serialization,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DwhError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DwhError::ConfigError { .. }
            | DwhError::ConfigValidationError { .. }
            | DwhError::MissingConfigError { .. }
            | DwhError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DwhError::IoError(_) | DwhError::StorageError { .. } => ErrorCategory::Storage,
            DwhError::SerializationError(_) | DwhError::CsvError(_) | DwhError::ZipError(_) => {
                ErrorCategory::Serialization
            }
            DwhError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Serialization | ErrorCategory::Processing => ErrorSeverity::Critical,
        }
    }

    /// 任何錯誤都以非 0 退出
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DwhError::MissingConfigError { field } => {
                format!("The warehouse config is missing the required key '{}'", field)
            }
            DwhError::InvalidConfigValueError { field, reason, .. } => {
                format!("The value of '{}' is not valid: {}", field, reason)
            }
            DwhError::ConfigValidationError { message, .. } => {
                format!("The config file could not be parsed: {}", message)
            }
            DwhError::IoError(e) => format!("File access failed: {}", e),
            DwhError::StorageError { message } => format!("Could not write output: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DwhError::MissingConfigError { .. } => {
                "Add the key to the config file, e.g. [S3] LOG_DATA=s3://bucket/log_data"
            }
            DwhError::InvalidConfigValueError { .. } => {
                "Fix the value, or pass --skip-validation to render with placeholder values"
            }
            DwhError::ConfigValidationError { .. } | DwhError::ConfigError { .. } => {
                "Check the config file syntax (ini sections or TOML tables)"
            }
            DwhError::IoError(_) | DwhError::StorageError { .. } => {
                "Check that the path exists and is writable, then run again"
            }
            _ => "Run again with --verbose and report the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, DwhError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = DwhError::MissingConfigError {
            field: "S3.LOG_DATA".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("S3.LOG_DATA"));
        assert!(err.user_friendly_message().contains("S3.LOG_DATA"));
    }

    #[test]
    fn test_io_error_is_storage() {
        let err: DwhError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            DwhError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "dwh.cfg")),
            DwhError::ConfigError {
                message: "--print and --dry-run cannot be combined".to_string(),
            },
            DwhError::ConfigValidationError {
                field: "ini_parsing".to_string(),
                message: "unterminated section".to_string(),
            },
            DwhError::MissingConfigError {
                field: "IAM_ROLE.ARN".to_string(),
            },
            DwhError::InvalidConfigValueError {
                field: "S3.LOG_DATA".to_string(),
                value: "log_data".to_string(),
                reason: "not an s3:// URI".to_string(),
            },
            DwhError::StorageError {
                message: "access denied".to_string(),
            },
            DwhError::ProcessingError {
                message: "no output formats selected".to_string(),
            },
        ];

        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{} exited with 0", err);
        }
        assert_eq!(errors[0].exit_code(), 2);
        assert_eq!(errors[3].exit_code(), 1);
        assert_eq!(errors[6].exit_code(), 3);
    }
}
