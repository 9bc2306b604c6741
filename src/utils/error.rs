use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Type error: {message}")]
    TypeError { message: String },

    #[error("Stream format error: {message}")]
    StreamFormat { message: String },

    #[error("Permission denied: {path}")]
    Permission {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Configuration error in '{field}': {message}")]
    Config { field: String, message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 錯誤分類，對應呼叫端可採取的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidArgument,
    Type,
    StreamFormat,
    Permission,
    NotFound,
    Io,
}

impl SdkError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError {
            message: message.into(),
        }
    }

    pub fn stream_format(message: impl Into<String>) -> Self {
        Self::StreamFormat {
            message: message.into(),
        }
    }

    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. }
            | Self::InvalidField { .. }
            | Self::Config { .. }
            | Self::InvalidConfigValue { .. } => ErrorCategory::InvalidArgument,
            Self::TypeError { .. } => ErrorCategory::Type,
            Self::StreamFormat { .. } => ErrorCategory::StreamFormat,
            Self::Permission { .. } => ErrorCategory::Permission,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::InvalidArgument => "Check the arguments and field values passed in",
            ErrorCategory::Type => "Pass a value of the expected type",
            ErrorCategory::StreamFormat => "Make sure the input is non-empty, valid JSON or YAML",
            ErrorCategory::Permission => "Check that the target location is writable",
            ErrorCategory::NotFound => "Check that the path and its parent directories exist",
            ErrorCategory::Io => "Retry the operation or inspect the underlying IO error",
        }
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
