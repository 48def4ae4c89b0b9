//! Error types for the Solr client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Validation errors are raised before any request leaves the process;
//! everything that goes wrong on the wire ends up as [`Error::Transport`].

use thiserror::Error;

/// The main error type for the Solr client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Invalid Solr parameter: {name}")]
    InvalidParameter { name: String },

    #[error("Invalid delete criteria provided: {message}")]
    InvalidDeleteCriteria { message: String },

    #[error("Value '{value}' for field '{field}' is not unique ({found} documents match)")]
    NonUniqueValue {
        field: String,
        value: String,
        found: u64,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("{action} failed in Solr: {message}")]
    Transport { action: String, message: String },

    #[error("Failed to decode Solr response: {message}")]
    Decode { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_param(name: impl Into<String>) -> Self {
        Self::InvalidParameter { name: name.into() }
    }

    /// Create an invalid delete criteria error
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self::InvalidDeleteCriteria {
            message: message.into(),
        }
    }

    /// Create a non-unique value error
    pub fn non_unique(field: impl Into<String>, value: impl Into<String>, found: u64) -> Self {
        Self::NonUniqueValue {
            field: field.into(),
            value: value.into(),
            found,
        }
    }

    /// Create a transport error
    pub fn transport(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for the Solr client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
