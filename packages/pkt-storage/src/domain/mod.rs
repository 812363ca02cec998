//! Domain layer for build artifact storage
//!
//! # Port Trait
//!
//! - `BuildStorage`: fetch inputs by name, store outputs under a name
//!
//! Names are `/`-separated relative paths (`construction_approach/subclass_construction_map.json`),
//! never absolute and never containing `..`.
//!
//! ```rust,ignore
//! use pkt_storage::{BuildStorage, LocalDirectoryStorage};
//!
//! let storage = LocalDirectoryStorage::new("/data/pkt/archive")?;
//! let edges = storage.fetch("Master_Edge_List_Dict.json")?;
//! storage.store(&output, "knowledge_graphs/full/PheKnowLator_OWL.nt")?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::{Result, StorageError};

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// Record of one stored artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    pub name: String,
    pub size_bytes: u64,
    /// Hex SHA-256 of the content
    pub sha256: String,
    pub stored_at: DateTime<Utc>,
}

/// Validate an artifact name and return it as a relative path.
pub fn artifact_path(name: &str) -> Result<PathBuf> {
    let trimmed = name.trim_matches('/');
    if trimmed.is_empty() {
        return Err(StorageError::invalid_name(name));
    }
    let path = Path::new(trimmed);
    let clean = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !clean {
        return Err(StorageError::invalid_name(name));
    }
    Ok(path.to_path_buf())
}

// ═══════════════════════════════════════════════════════════════════════════
// Port
// ═══════════════════════════════════════════════════════════════════════════

/// Artifact store used to stage build inputs and archive outputs
pub trait BuildStorage: Send + Sync {
    /// Local path of the artifact called `name`.
    fn fetch(&self, name: &str) -> Result<PathBuf>;

    /// Copy `local` into the store as `name`.
    fn store(&self, local: &Path, name: &str) -> Result<StoredArtifact>;

    /// Names under `prefix` (empty for all), sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}
