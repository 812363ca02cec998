//! Node metadata (`node_data/node_metadata_dict.json`)
//!
//! Labels, descriptions and synonyms keyed by full URI, for nodes and for
//! relations. Built upstream; the engine only reads it.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, ConfigResult};
use crate::shared::vocab::{OBO_DEFINITION, OBO_HAS_EXACT_SYNONYM, RDFS_LABEL};
use crate::shared::{Node, Triple};

const ARTIFACT: &str = "node metadata";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetadataEntry {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "synonyms")]
    pub synonyms: Vec<String>,
}

/// Synonyms come either as a list or as a single `|`-joined string.
fn synonyms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
        Missing(()),
    }

    let values = match Raw::deserialize(deserializer)? {
        Raw::List(list) => list,
        Raw::Joined(joined) => joined.split('|').map(str::to_string).collect(),
        Raw::Missing(()) => Vec::new(),
    };
    Ok(values
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "None")
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeMetadata {
    #[serde(default)]
    pub nodes: HashMap<String, MetadataEntry>,
    #[serde(default)]
    pub relations: HashMap<String, MetadataEntry>,
}

impl NodeMetadata {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.is_file() {
            return Err(ConfigError::missing_artifact(ARTIFACT, path));
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(ConfigError::empty_artifact(ARTIFACT, path));
        }
        serde_json::from_str(&content).map_err(|e| ConfigError::malformed(ARTIFACT, path, e))
    }

    /// Label, definition and exact-synonym triples for a node.
    pub fn node_triples(&self, uri: &str) -> Vec<Triple> {
        let Some(entry) = self.nodes.get(uri) else {
            return Vec::new();
        };
        let mut triples = Vec::with_capacity(2 + entry.synonyms.len());
        let subject = Node::iri(uri);
        if let Some(label) = non_empty(&entry.label) {
            triples.push(Triple::new(subject.clone(), RDFS_LABEL, Node::literal(label)));
        }
        if let Some(description) = non_empty(&entry.description) {
            triples.push(Triple::new(subject.clone(), OBO_DEFINITION, Node::literal(description)));
        }
        for synonym in &entry.synonyms {
            triples.push(Triple::new(subject.clone(), OBO_HAS_EXACT_SYNONYM, Node::literal(synonym)));
        }
        triples
    }

    pub fn relation_label(&self, uri: &str) -> Option<&str> {
        self.relations.get(uri).and_then(|e| non_empty(&e.label))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relations.is_empty()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "None")
}
