//! In-memory RDF model
//!
//! `KnowledgeGraph` is an ordered triple set. Ordering makes every
//! serialization byte-stable across runs and worker counts, and set semantics
//! make fragment union idempotent.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// RDF term in subject or object position
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Node {
    Iri(String),
    Blank(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Node {
    pub fn iri(value: impl Into<String>) -> Self {
        Node::Iri(value.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Node::Blank(id.into())
    }

    /// Plain string literal
    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal { .. })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", iri),
            Node::Blank(id) => write!(f, "_:{}", id),
            Node::Literal {
                value,
                datatype,
                language,
            } => {
                write!(f, "\"{}\"", escape_literal(value))?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Escape a literal lexical form for N-Triples output.
fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// A single statement. Predicates are always IRIs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Node,
    pub predicate: String,
    pub object: Node,
}

impl Triple {
    pub fn new(subject: Node, predicate: impl Into<String>, object: Node) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Shorthand for a triple whose three positions are all IRIs
    pub fn iris(subject: &str, predicate: &str, object: &str) -> Self {
        Self::new(Node::iri(subject), predicate, Node::iri(object))
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.subject, self.predicate, self.object)
    }
}

/// Ordered, duplicate-free triple set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    triples: BTreeSet<Triple>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the triple was not present yet.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Set union, consuming `other`.
    pub fn union(&mut self, other: KnowledgeGraph) {
        if self.triples.is_empty() {
            self.triples = other.triples;
        } else {
            self.triples.extend(other.triples);
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn triples(&self) -> &BTreeSet<Triple> {
        &self.triples
    }

    /// Subjects that carry `rdf:type <class_iri>`.
    pub fn subjects_of_type(&self, class_iri: &str) -> impl Iterator<Item = &Node> + '_ {
        let class_iri = class_iri.to_string();
        self.triples.iter().filter_map(move |t| {
            let typed = t.predicate == super::vocab::RDF_TYPE
                && matches!(&t.object, Node::Iri(o) if *o == class_iri);
            typed.then_some(&t.subject)
        })
    }

    /// Distinct subject and object nodes, excluding literals.
    pub fn nodes(&self) -> HashSet<&Node> {
        let mut nodes = HashSet::new();
        for t in &self.triples {
            nodes.insert(&t.subject);
            if !t.object.is_literal() {
                nodes.insert(&t.object);
            }
        }
        nodes
    }
}

impl Extend<Triple> for KnowledgeGraph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl FromIterator<Triple> for KnowledgeGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for KnowledgeGraph {
    type Item = Triple;
    type IntoIter = std::collections::btree_set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a KnowledgeGraph {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
