//! Staging build inputs from, and archiving outputs to, a `BuildStorage`.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pkt_storage::{BuildStorage, StoredArtifact};

use crate::error::Result;

/// Copy every artifact under `prefix` into `destination`, keeping the
/// relative layout. Returns the number of files staged.
pub fn stage_resources(storage: &dyn BuildStorage, prefix: &str, destination: &Path) -> Result<usize> {
    let prefix = normalize_prefix(prefix);
    let names = storage.list(&prefix)?;
    for name in &names {
        let source = storage.fetch(name)?;
        let target = destination.join(name.strip_prefix(prefix.as_str()).unwrap_or(name));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&source, &target)?;
        debug!("Staged {} -> {}", name, target.display());
    }
    info!("Staged {} resources into {}", names.len(), destination.display());
    Ok(names.len())
}

/// Store each output under `prefix/<file name>`.
pub fn archive_outputs(
    storage: &dyn BuildStorage,
    outputs: &[PathBuf],
    prefix: &str,
) -> Result<Vec<StoredArtifact>> {
    let prefix = normalize_prefix(prefix);
    let mut stored = Vec::with_capacity(outputs.len());
    for output in outputs {
        let file_name = output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let artifact = storage.store(output, &format!("{}{}", prefix, file_name))?;
        debug!("Archived {} ({} bytes)", artifact.name, artifact.size_bytes);
        stored.push(artifact);
    }
    info!("Archived {} outputs under '{}'", stored.len(), prefix);
    Ok(stored)
}

/// `""` stays empty; anything else ends with exactly one `/`.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkt_storage::LocalDirectoryStorage;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("resources"), "resources/");
        assert_eq!(normalize_prefix("/kg/full/"), "kg/full/");
    }

    #[test]
    fn test_stage_then_archive() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDirectoryStorage::new(dir.path().join("archive")).unwrap();

        let local = dir.path().join("edges.json");
        fs::write(&local, "{}").unwrap();
        storage.store(&local, "resources/Master_Edge_List_Dict.json").unwrap();
        storage.store(&local, "resources/construction_approach/subclass_construction_map.json").unwrap();
        storage.store(&local, "elsewhere/ignored.json").unwrap();

        let staged = dir.path().join("staged");
        assert_eq!(stage_resources(&storage, "resources", &staged).unwrap(), 2);
        assert!(staged.join("Master_Edge_List_Dict.json").is_file());
        assert!(staged.join("construction_approach/subclass_construction_map.json").is_file());
        assert!(!staged.join("ignored.json").exists());

        let archived = archive_outputs(&storage, &[local.clone()], "/kg/full/").unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].name, "kg/full/edges.json");
        assert_eq!(storage.list("kg/").unwrap(), vec!["kg/full/edges.json".to_string()]);
    }
}
