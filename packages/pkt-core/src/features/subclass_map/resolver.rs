//! Subclass map lookup
//!
//! The map is loaded once, validated, and never mutated afterwards. A missing
//! key is a normal outcome the worker records in its error log.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, ConfigResult};
use crate::shared::vocab::{expand, ns};

const ARTIFACT: &str = "subclass map";

/// Raw id → ontology class IRIs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubclassResolver {
    map: HashMap<String, Vec<String>>,
}

impl SubclassResolver {
    /// Build from raw `id → [class id]` entries. Class ids are expanded into
    /// the OBO namespace unless already absolute.
    pub fn from_entries(entries: HashMap<String, Vec<String>>) -> Result<Self, String> {
        let mut map = HashMap::with_capacity(entries.len());
        for (id, classes) in entries {
            if classes.is_empty() {
                return Err(format!("entry '{}' has no classes", id));
            }
            let classes = classes.iter().map(|c| expand(ns::OBO, c)).collect();
            map.insert(id, classes);
        }
        Ok(Self { map })
    }

    /// Load `subclass_construction_map.json`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.is_file() {
            return Err(ConfigError::missing_artifact(ARTIFACT, path));
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(ConfigError::empty_artifact(ARTIFACT, path));
        }

        let entries: HashMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|e| ConfigError::malformed(ARTIFACT, path, e))?;
        if entries.is_empty() {
            return Err(ConfigError::empty_artifact(ARTIFACT, path));
        }

        Self::from_entries(entries).map_err(|msg| ConfigError::malformed(ARTIFACT, path, msg))
    }

    /// Classes for `id`, or `None` when the id was never mapped.
    pub fn resolve(&self, id: &str) -> Option<&[String]> {
        self.map.get(id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
