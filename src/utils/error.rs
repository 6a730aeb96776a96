use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid request: {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    #[error("Failed to serialize request payload: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Unexpected response status code: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Failed to decode JSON response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<UtilError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Protocol,
    Storage,
    Configuration,
}

impl UtilError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            UtilError::Http(_) => ErrorCategory::Network,
            UtilError::InvalidUrl(_)
            | UtilError::InvalidRequest { .. }
            | UtilError::Serialization(_)
            | UtilError::UnexpectedStatus { .. }
            | UtilError::Decode { .. } => ErrorCategory::Protocol,
            UtilError::IoError(_)
            | UtilError::KeyNotFound { .. }
            | UtilError::StoreError { .. } => ErrorCategory::Storage,
            UtilError::ConfigValidationError { .. }
            | UtilError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            UtilError::Context { source, .. } => source.category(),
        }
    }

    /// 呼叫端重試是否可能成功；本 crate 本身不會重試
    pub fn is_retryable(&self) -> bool {
        match self {
            UtilError::Http(e) => e.is_timeout() || e.is_connect(),
            UtilError::UnexpectedStatus { status } => *status == 429 || *status >= 500,
            UtilError::Context { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            UtilError::KeyNotFound { .. } => true,
            UtilError::Context { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, UtilError>;
