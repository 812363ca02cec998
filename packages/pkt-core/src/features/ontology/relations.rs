//! Relation dictionaries
//!
//! Two text artifacts drive relation processing:
//!
//! - `RELATIONS_LABELS.txt`: `<relation IRI or id>\t<label>`
//! - `INVERSE_RELATIONS.txt`: `<relation id>\towl:inverseOf\t<inverse id>`
//!
//! Keys are local ids (`RO_0002435`), the last path segment of the IRI.
//! Inverse pairs are registered in both directions.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationDictionaries {
    labels: HashMap<String, String>,
    inverses: HashMap<String, String>,
}

/// Local id of a relation IRI (`http://purl.obolibrary.org/obo/RO_0002435` → `RO_0002435`).
pub fn local_id(iri: &str) -> &str {
    iri.rsplit(|c: char| c == '/' || c == '#').next().unwrap_or(iri)
}

impl RelationDictionaries {
    /// Relation processing disabled
    pub fn empty() -> Self {
        Self::default()
    }

    /// Labels and inverse pairs together.
    pub fn load(labels_path: &Path, inverse_path: &Path) -> Result<Self> {
        let mut dictionaries = Self::load_labels(labels_path)?;
        dictionaries.load_inverses(inverse_path)?;
        Ok(dictionaries)
    }

    /// Labels only; the inverse map stays empty.
    pub fn load_labels(labels_path: &Path) -> Result<Self> {
        let mut dictionaries = Self::default();
        for line in fs::read_to_string(labels_path)?.lines() {
            let mut columns = line.split('\t');
            if let (Some(relation), Some(label)) = (columns.next(), columns.next()) {
                let relation = relation.trim();
                if relation.is_empty() || relation.starts_with('#') {
                    continue;
                }
                dictionaries
                    .labels
                    .insert(local_id(relation).to_string(), label.trim().to_string());
            }
        }
        debug!("Loaded {} relation labels", dictionaries.labels.len());
        Ok(dictionaries)
    }

    pub fn load_inverses(&mut self, inverse_path: &Path) -> Result<()> {
        for line in fs::read_to_string(inverse_path)?.lines() {
            let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
            let pair = match columns.as_slice() {
                [relation, "owl:inverseOf", inverse] => Some((*relation, *inverse)),
                [relation, inverse] => Some((*relation, *inverse)),
                _ => None,
            };
            if let Some((relation, inverse)) = pair {
                if relation.starts_with('#') || !relation.contains('_') {
                    continue;
                }
                self.add_inverse(local_id(relation), local_id(inverse));
            }
        }
        debug!("Loaded {} inverse relations", self.inverses.len());
        Ok(())
    }

    pub fn add_inverse(&mut self, relation: &str, inverse: &str) {
        self.inverses.insert(relation.to_string(), inverse.to_string());
        self.inverses.insert(inverse.to_string(), relation.to_string());
    }

    pub fn add_label(&mut self, relation: &str, label: &str) {
        self.labels.insert(local_id(relation).to_string(), label.to_string());
    }

    pub fn label_of(&self, relation: &str) -> Option<&str> {
        self.labels.get(local_id(relation)).map(String::as_str)
    }

    pub fn inverse_of(&self, relation: &str) -> Option<&str> {
        self.inverses.get(local_id(relation)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.inverses.is_empty()
    }

    /// Inverse relation to build for an edge type, if any.
    ///
    /// A symmetric relation (its own inverse) needs no inverse edges when the
    /// edge list already contains every pair in both directions.
    pub fn check_relations(&self, relation: &str, edge_list: &[(String, String)]) -> Option<String> {
        let inverse = self.inverse_of(relation)?;
        if inverse == local_id(relation) {
            let pairs: HashSet<(&str, &str)> = edge_list
                .iter()
                .map(|(s, o)| (s.as_str(), o.as_str()))
                .collect();
            let already_bidirectional = !edge_list.is_empty()
                && edge_list
                    .iter()
                    .all(|(s, o)| pairs.contains(&(o.as_str(), s.as_str())));
            if already_bidirectional {
                return None;
            }
        }
        Some(inverse.to_string())
    }
}
