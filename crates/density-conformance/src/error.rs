//! Error types for the conformance harness.

use thiserror::Error;

/// Errors loading or validating harness configuration.
///
/// Contract violations by the checked object are not errors; they are
/// reported as failures in a [`ConformanceReport`](crate::ConformanceReport).
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid tolerance: {0}")]
    InvalidTolerance(String),
}
