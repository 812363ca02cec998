//! Local directory adapter
//!
//! Artifacts live as plain files under a root directory, one file per name.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::{artifact_path, BuildStorage, StoredArtifact};
use crate::{Result, StorageError};

#[derive(Debug, Clone)]
pub struct LocalDirectoryStorage {
    root: PathBuf,
}

impl LocalDirectoryStorage {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BuildStorage for LocalDirectoryStorage {
    fn fetch(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(artifact_path(name)?);
        if path.is_file() {
            Ok(path)
        } else {
            Err(StorageError::artifact_not_found(name))
        }
    }

    fn store(&self, local: &Path, name: &str) -> Result<StoredArtifact> {
        let target = self.root.join(artifact_path(name)?);
        if !local.is_file() {
            return Err(StorageError::artifact_not_found(local.display().to_string()));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = fs::read(local)?;
        fs::write(&target, &content)?;

        Ok(StoredArtifact {
            name: name.trim_matches('/').to_string(),
            size_bytes: content.len() as u64,
            sha256: format!("{:x}", Sha256::digest(&content)),
            stored_at: Utc::now(),
        })
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| {
                StorageError::new(crate::ErrorKind::IO, format!("Walk failed: {}", e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if name.starts_with(prefix) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
