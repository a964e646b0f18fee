use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransTrackError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Upload failed: {message}")]
    UploadError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Network,
    Upload,
    Serialization,
    Configuration,
}

impl TransTrackError {
    pub fn upload(message: impl Into<String>) -> Self {
        Self::UploadError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::HttpError(_) => ErrorCategory::Network,
            Self::SerializationError(_) => ErrorCategory::Serialization,
            Self::UploadError { .. } => ErrorCategory::Upload,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the archive store: {}", self),
            ErrorCategory::Upload => format!("The archive store rejected the file: {}", self),
            ErrorCategory::Serialization => format!("Unexpected response format: {}", self),
            ErrorCategory::Configuration => format!("Configuration is invalid: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the configured folders exist and are writable",
            ErrorCategory::Network => "Check network connectivity and the upload endpoint",
            ErrorCategory::Upload => "Check the upload credentials and the archive store status",
            ErrorCategory::Serialization => "Check that the upload endpoint returns JSON",
            ErrorCategory::Configuration => "Review the TOML configuration and CLI arguments",
        }
    }

    /// Process exit code used by the binary.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Io => 2,
            ErrorCategory::Network | ErrorCategory::Upload | ErrorCategory::Serialization => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransTrackError>;
