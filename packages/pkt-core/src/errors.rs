//! Error types for pkt-core
//!
//! Resolution misses and class-membership failures are not errors: the first
//! is recorded in the worker's error log, the second is a boolean check.
//! Everything here aborts the operation that raised it.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for pkt-core operations
#[derive(Debug, Error)]
pub enum KgError {
    /// Invalid build configuration or missing input artifact
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed relation identifier handed to vocabulary verification
    #[error("Validation failure: {0}")]
    Validation(String),

    /// RDF artifact could not be parsed
    #[error("RDF parse error in {path}: {message}")]
    RdfParse { path: String, message: String },

    /// Graph could not be written in the requested RDF syntax
    #[error("RDF serialization error in {path}: {message}")]
    RdfSerialize { path: String, message: String },

    /// External ontology merge failed or produced nothing
    #[error("Ontology merge failed: {0}")]
    Merge(String),
}

impl KgError {
    pub fn validation(msg: impl Into<String>) -> Self {
        KgError::Validation(msg.into())
    }

    pub fn rdf_parse(path: impl std::fmt::Display, e: impl std::fmt::Display) -> Self {
        KgError::RdfParse {
            path: path.to_string(),
            message: e.to_string(),
        }
    }

    pub fn rdf_serialize(path: impl std::fmt::Display, e: impl std::fmt::Display) -> Self {
        KgError::RdfSerialize {
            path: path.to_string(),
            message: e.to_string(),
        }
    }
}

/// Result type alias for pkt-core operations
pub type Result<T> = std::result::Result<T, KgError>;
