//! Centralized error types for Packmind.
//!
//! The hierarchy separates what went wrong (full context for logs) from
//! what the user should see (`user_message()`).

use thiserror::Error;

/// Top-level application error type.
///
/// Errors that reach the CLI boundary are converted into this type so
/// that the surface can always show a `user_message()`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid usage: {0}")]
    Usage(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for terminal display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Usage(_) => "Unrecognized or incomplete command.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Local storage errors (JSON key files).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open storage directory: {0}")]
    OpenFailed(String),

    #[error("Failed to read key '{key}': {message}")]
    ReadFailed { key: String, message: String },

    #[error("Failed to write key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("Failed to serialize value for key '{key}': {message}")]
    Serialize { key: String, message: String },
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::OpenFailed(_) => "Unable to access local data directory.",
            StorageError::ReadFailed { .. } => "Unable to read saved data. Please try again.",
            StorageError::WriteFailed { .. } => "Unable to save data. Please try again.",
            StorageError::Serialize { .. } => "A data operation failed. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory unavailable")]
    NoConfigDir,

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "Could not locate a configuration directory.",
            ConfigError::Io(_) => "Failed to read the configuration file.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let err = StorageError::OpenFailed("denied".into());
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Storage(StorageError::OpenFailed(_))));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Config(ConfigError::NoConfigDir);
        assert_eq!(
            app_err.user_message(),
            "Could not locate a configuration directory."
        );
    }

    #[test]
    fn test_storage_messages_distinct() {
        let read = StorageError::ReadFailed {
            key: "reminder_items".into(),
            message: "eof".into(),
        };
        let write = StorageError::WriteFailed {
            key: "reminder_items".into(),
            message: "full".into(),
        };
        assert_ne!(read.user_message(), write.user_message());
    }
}
