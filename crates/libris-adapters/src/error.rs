//! Adapter-level errors.

use std::path::PathBuf;

use libris_core::{application::ApplicationError, error::LibrisError};
use thiserror::Error;

/// Failures while reading snapshots or rulebooks from outside the process.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rulebook configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The document parsed but its records do not form a consistent library.
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

impl AdapterError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }
}

impl From<AdapterError> for LibrisError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Config(e) => LibrisError::Configuration {
                message: e.to_string(),
            },
            other => ApplicationError::SnapshotUnavailable {
                reason: other.to_string(),
            }
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::error::ErrorCategory;

    #[test]
    fn invalid_snapshot_crosses_the_port_as_unavailable() {
        let err: LibrisError = AdapterError::invalid("item#3 references unknown edition#9").into();

        assert_eq!(
            err,
            LibrisError::Application(ApplicationError::SnapshotUnavailable {
                reason: "Invalid snapshot: item#3 references unknown edition#9".into()
            })
        );
    }

    #[test]
    fn config_error_becomes_configuration() {
        let err: LibrisError =
            AdapterError::Config(config::ConfigError::Message("bad key".into())).into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
