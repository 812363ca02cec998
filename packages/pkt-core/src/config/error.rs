//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
///
/// One variant per cause so callers (and tests) can tell a missing ontology
/// directory apart from a bad flag value without parsing messages.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required directory is absent
    #[error("Required directory '{}' does not exist", path.display())]
    MissingDirectory { path: PathBuf },

    /// Required directory exists but holds no files
    #[error("Required directory '{}' is empty", path.display())]
    EmptyDirectory { path: PathBuf },

    /// Required input file is absent
    #[error("Missing {name} artifact at '{}'", path.display())]
    MissingArtifact { name: String, path: PathBuf },

    /// Required input file exists but is empty
    #[error("The {name} artifact at '{}' is empty", path.display())]
    EmptyArtifact { name: String, path: PathBuf },

    /// Input file could not be interpreted
    #[error("Malformed {name} artifact at '{}': {message}", path.display())]
    MalformedArtifact {
        name: String,
        path: PathBuf,
        message: String,
    },

    /// Construction approach other than `subclass` / `instance`
    #[error("Unsupported construction approach '{0}'. Valid approaches: subclass, instance")]
    UnsupportedApproach(String),

    /// Build variant other than `full` / `partial` / `post-closure`
    #[error("Unknown build variant '{0}'. Valid variants: full, partial, post-closure")]
    UnknownVariant(String),

    /// Two-valued flag given a string other than yes/no
    #[error("Invalid value '{value}' for flag '{flag}'. Expected 'yes' or 'no'")]
    InvalidFlagValue { flag: String, value: String },

    /// Two-valued flag given a non-string value
    #[error("Invalid type for flag '{flag}': expected a 'yes'/'no' string, found {found}")]
    InvalidFlagType { flag: String, found: String },

    /// Worker pool cannot be empty
    #[error("Invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn missing_artifact(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingArtifact {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn empty_artifact(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::EmptyArtifact {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn malformed(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl ToString,
    ) -> Self {
        Self::MalformedArtifact {
            name: name.into(),
            path: path.into(),
            message: message.to_string(),
        }
    }
}
