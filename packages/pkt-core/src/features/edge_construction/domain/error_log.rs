//! Per-edge-type resolution misses
//!
//! Each worker owns one log. Keys only exist for edge types with at least one
//! miss, and ids keep first-seen order without duplicates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLog {
    entries: BTreeMap<String, Vec<String>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unresolved id. Returns `false` when it was already recorded.
    pub fn record(&mut self, edge_type: &str, id: &str) -> bool {
        let ids = self.entries.entry(edge_type.to_string()).or_default();
        if ids.iter().any(|existing| existing == id) {
            return false;
        }
        ids.push(id.to_string());
        true
    }

    /// Key union. An edge type present in both logs takes `other`'s list.
    pub fn merge(&mut self, other: ErrorLog) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, edge_type: &str) -> Option<&[String]> {
        self.entries.get(edge_type).map(Vec::as_slice)
    }

    pub fn edge_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Total number of unresolved ids
    pub fn miss_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
