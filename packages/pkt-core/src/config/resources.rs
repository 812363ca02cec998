//! Canonical resource layout
//!
//! Every input and output location is derived from two roots: the resources
//! directory and the write location.

use super::error::{ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};

pub const EDGE_SPEC_FILE: &str = "Master_Edge_List_Dict.json";
pub const SUBCLASS_MAP_FILE: &str = "construction_approach/subclass_construction_map.json";
pub const SUBCLASS_LOG_FILE: &str = "construction_approach/subclass_map_log.json";
pub const RELATIONS_LABELS_FILE: &str = "relations_data/RELATIONS_LABELS.txt";
pub const INVERSE_RELATIONS_FILE: &str = "relations_data/INVERSE_RELATIONS.txt";
pub const NODE_METADATA_FILE: &str = "node_data/node_metadata_dict.json";
pub const ONTOLOGY_DIR: &str = "ontologies";
pub const MERGED_ONTOLOGY_FILE: &str = "PheKnowLator_MergedOntologies.owl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    pub resources: PathBuf,
    pub write_location: PathBuf,
}

impl ResourcePaths {
    pub fn new(resources: impl Into<PathBuf>, write_location: impl Into<PathBuf>) -> Self {
        Self {
            resources: resources.into(),
            write_location: write_location.into(),
        }
    }

    pub fn edge_spec(&self) -> PathBuf {
        self.resources.join(EDGE_SPEC_FILE)
    }

    pub fn subclass_map(&self) -> PathBuf {
        self.resources.join(SUBCLASS_MAP_FILE)
    }

    pub fn subclass_log(&self) -> PathBuf {
        self.resources.join(SUBCLASS_LOG_FILE)
    }

    pub fn relations_labels(&self) -> PathBuf {
        self.resources.join(RELATIONS_LABELS_FILE)
    }

    pub fn inverse_relations(&self) -> PathBuf {
        self.resources.join(INVERSE_RELATIONS_FILE)
    }

    pub fn node_metadata(&self) -> PathBuf {
        self.resources.join(NODE_METADATA_FILE)
    }

    pub fn ontologies(&self) -> PathBuf {
        self.resources.join(ONTOLOGY_DIR)
    }

    pub fn merged_ontology(&self) -> PathBuf {
        self.write_location.join(MERGED_ONTOLOGY_FILE)
    }
}

/// Directory must exist and contain at least one visible entry.
pub fn require_non_empty_dir(path: &Path) -> ConfigResult<()> {
    if !path.is_dir() {
        return Err(ConfigError::MissingDirectory {
            path: path.to_path_buf(),
        });
    }
    let has_entries = fs::read_dir(path)?
        .filter_map(|entry| entry.ok())
        .any(|entry| !entry.file_name().to_string_lossy().starts_with('.'));
    if has_entries {
        Ok(())
    } else {
        Err(ConfigError::EmptyDirectory {
            path: path.to_path_buf(),
        })
    }
}

/// File must exist and hold at least one byte.
pub fn require_non_empty_file(name: &str, path: &Path) -> ConfigResult<()> {
    if !path.is_file() {
        return Err(ConfigError::missing_artifact(name, path));
    }
    if fs::metadata(path)?.len() == 0 {
        return Err(ConfigError::empty_artifact(name, path));
    }
    Ok(())
}
