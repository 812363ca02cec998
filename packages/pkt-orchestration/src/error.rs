use pkt_core::{ConfigError, KgError};
use pkt_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] KgError),

    #[error("Worker {worker} failed: {source}")]
    WorkerFailed {
        worker: usize,
        #[source]
        source: KgError,
    },

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("Merged ontology not found at {}; post-closure builds require it", .0.display())]
    MissingMergedOntology(PathBuf),

    #[error("OWL decoding failed: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrchestratorError {
    pub fn pool<E: std::fmt::Display>(e: E) -> Self {
        Self::Pool(e.to_string())
    }

    pub fn decode<E: std::fmt::Display>(e: E) -> Self {
        Self::Decode(e.to_string())
    }

    /// Index of the failed worker, if this is a worker failure
    pub fn failed_worker(&self) -> Option<usize> {
        match self {
            Self::WorkerFailed { worker, .. } => Some(*worker),
            _ => None,
        }
    }
}
