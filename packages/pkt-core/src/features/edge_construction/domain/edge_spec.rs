//! Edge specification (`Master_Edge_List_Dict.json`)
//!
//! One entry per edge type plus an optional top-level `entity_namespaces`
//! table used to label statistics.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, ConfigResult};
use crate::shared::vocab::{expand, ns};

const ARTIFACT: &str = "edge specification";
const NAMESPACES_KEY: &str = "entity_namespaces";

/// How one side of an edge is treated during construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Ontology class, validated against the class set
    Class,
    /// Non-ontology entity, typed through the subclass map
    Entity,
    /// Individual, typed through the subclass map
    Instance,
}

impl NodeKind {
    /// `subclass` is accepted as a synonym of `entity`.
    pub fn parse(side: &str) -> Option<Self> {
        match side.trim().to_ascii_lowercase().as_str() {
            "class" => Some(NodeKind::Class),
            "entity" | "subclass" => Some(NodeKind::Entity),
            "instance" => Some(NodeKind::Instance),
            _ => None,
        }
    }

    pub fn is_class(self) -> bool {
        self == NodeKind::Class
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::Entity => "entity",
            NodeKind::Instance => "instance",
        }
    }
}

/// `<subject kind>-<object kind>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub subject: NodeKind,
    pub object: NodeKind,
}

impl DataType {
    pub fn new(subject: NodeKind, object: NodeKind) -> Self {
        Self { subject, object }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let (subject, object) = value.split_once('-')?;
        Some(Self::new(NodeKind::parse(subject)?, NodeKind::parse(object)?))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.subject.as_str(), self.object.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct RawEdgeType {
    data_type: String,
    edge_relation: String,
    #[serde(default)]
    inverse_relation: Option<String>,
    uri: Vec<String>,
    edge_list: Vec<(String, String)>,
}

/// One edge type, raw ids not yet resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub edge_type: String,
    pub data_type: DataType,
    /// Relation local id (`RO_0003302`) or IRI
    pub relation: String,
    pub inverse_relation: Option<String>,
    /// Namespace prefixes for (subject, object)
    pub uri: (String, String),
    pub edge_list: Vec<(String, String)>,
}

impl EdgeSpec {
    /// Expanded URI of a subject id. Class sides always live in OBO.
    pub fn subject_uri(&self, id: &str) -> String {
        side_uri(self.data_type.subject, &self.uri.0, id)
    }

    pub fn object_uri(&self, id: &str) -> String {
        side_uri(self.data_type.object, &self.uri.1, id)
    }

    pub fn relation_uri(&self) -> String {
        expand(ns::OBO, &self.relation)
    }
}

fn side_uri(kind: NodeKind, prefix: &str, id: &str) -> String {
    if kind.is_class() {
        expand(ns::OBO, id)
    } else {
        expand(prefix, id)
    }
}

/// Parsed `Master_Edge_List_Dict.json`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSpecDocument {
    /// Short name → namespace prefix
    pub entity_namespaces: BTreeMap<String, String>,
    /// Edge types, ordered by key
    pub edges: BTreeMap<String, EdgeSpec>,
}

impl EdgeSpecDocument {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.is_file() {
            return Err(ConfigError::missing_artifact(ARTIFACT, path));
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(ConfigError::empty_artifact(ARTIFACT, path));
        }
        let document = Self::parse(&content).map_err(|msg| ConfigError::malformed(ARTIFACT, path, msg))?;
        if document.edges.is_empty() {
            return Err(ConfigError::empty_artifact(ARTIFACT, path));
        }
        Ok(document)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut root: Map<String, Value> = serde_json::from_str(content).map_err(|e| e.to_string())?;

        let entity_namespaces = match root.remove(NAMESPACES_KEY) {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| format!("{}: {}", NAMESPACES_KEY, e))?,
            None => BTreeMap::new(),
        };

        let mut edges = BTreeMap::new();
        for (edge_type, value) in root {
            let raw: RawEdgeType =
                serde_json::from_value(value).map_err(|e| format!("{}: {}", edge_type, e))?;
            let spec = Self::validate(edge_type.clone(), raw)?;
            edges.insert(edge_type, spec);
        }

        Ok(Self {
            entity_namespaces,
            edges,
        })
    }

    fn validate(edge_type: String, raw: RawEdgeType) -> Result<EdgeSpec, String> {
        let data_type = DataType::parse(&raw.data_type)
            .ok_or_else(|| format!("{}: unsupported data_type '{}'", edge_type, raw.data_type))?;
        let uri = match raw.uri.as_slice() {
            [subject, object] => (subject.clone(), object.clone()),
            other => {
                return Err(format!(
                    "{}: expected 2 namespace prefixes, found {}",
                    edge_type,
                    other.len()
                ))
            }
        };
        if raw.edge_relation.trim().is_empty() {
            return Err(format!("{}: empty edge_relation", edge_type));
        }
        let inverse_relation = raw.inverse_relation.filter(|r| !r.trim().is_empty());

        Ok(EdgeSpec {
            edge_type,
            data_type,
            relation: raw.edge_relation,
            inverse_relation,
            uri,
            edge_list: raw.edge_list,
        })
    }

    pub fn get(&self, edge_type: &str) -> Option<&EdgeSpec> {
        self.edges.get(edge_type)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
