// Integer Encoding
//
// Stable node/relation → integer map for downstream embedding tools.
// Integers are assigned in order of first appearance while walking the
// (ordered) graph, so the same graph always yields the same encoding.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::shared::vocab::RDFS_LABEL;
use crate::shared::{KnowledgeGraph, Node};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerEncoding {
    /// N-Triples term → integer
    pub identifiers: HashMap<String, u64>,
    /// Terms in assignment order
    pub terms: Vec<EncodedTerm>,
    pub triples: Vec<(u64, u64, u64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTerm {
    pub id: u64,
    pub term: String,
    pub is_relation: bool,
}

/// Paths of the four artifacts written next to a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedArtifacts {
    pub integers: PathBuf,
    pub identifiers: PathBuf,
    pub identifier_map: PathBuf,
    pub node_labels: PathBuf,
}

impl EncodedArtifacts {
    /// Artifact paths for the output stem `stem` (no extension).
    pub fn for_stem(stem: &str) -> Self {
        Self {
            integers: PathBuf::from(format!("{}_Triples_Integers.txt", stem)),
            identifiers: PathBuf::from(format!("{}_Triples_Identifiers.txt", stem)),
            identifier_map: PathBuf::from(format!("{}_Identifier_Map.json", stem)),
            node_labels: PathBuf::from(format!("{}_NodeLabels.txt", stem)),
        }
    }
}

impl IntegerEncoding {
    pub fn encode(graph: &KnowledgeGraph) -> Self {
        let mut encoding = Self::default();
        for triple in graph {
            let s = encoding.intern(triple.subject.to_string(), false);
            let p = encoding.intern(format!("<{}>", triple.predicate), true);
            let o = encoding.intern(triple.object.to_string(), false);
            encoding.triples.push((s, p, o));
        }
        encoding
    }

    fn intern(&mut self, term: String, is_relation: bool) -> u64 {
        if let Some(id) = self.identifiers.get(&term) {
            return *id;
        }
        let id = self.terms.len() as u64;
        self.identifiers.insert(term.clone(), id);
        self.terms.push(EncodedTerm {
            id,
            term,
            is_relation,
        });
        id
    }

    pub fn id_of(&self, term: &str) -> Option<u64> {
        self.identifiers.get(term).copied()
    }
}

/// Write integer/identifier triples, the identifier map and the label table.
pub fn write_encoded_artifacts(graph: &KnowledgeGraph, stem: &str) -> Result<EncodedArtifacts> {
    let artifacts = EncodedArtifacts::for_stem(stem);
    if let Some(parent) = Path::new(stem).parent() {
        fs::create_dir_all(parent)?;
    }
    let encoding = IntegerEncoding::encode(graph);

    let mut ints = BufWriter::new(File::create(&artifacts.integers)?);
    let mut ids = BufWriter::new(File::create(&artifacts.identifiers)?);
    writeln!(ints, "subject\tpredicate\tobject")?;
    writeln!(ids, "subject\tpredicate\tobject")?;
    for ((s, p, o), triple) in encoding.triples.iter().zip(graph.iter()) {
        writeln!(ints, "{}\t{}\t{}", s, p, o)?;
        writeln!(
            ids,
            "{}\t<{}>\t{}",
            triple.subject, triple.predicate, triple.object
        )?;
    }
    ints.flush()?;
    ids.flush()?;

    let sorted: BTreeMap<&str, u64> = encoding
        .identifiers
        .iter()
        .map(|(term, id)| (term.as_str(), *id))
        .collect();
    let map_file = BufWriter::new(File::create(&artifacts.identifier_map)?);
    serde_json::to_writer_pretty(map_file, &sorted)?;

    let labels = node_labels(graph);
    let mut table = BufWriter::new(File::create(&artifacts.node_labels)?);
    writeln!(table, "entity_type\tinteger_id\tentity_uri\tlabel")?;
    for term in encoding.terms.iter().filter(|t| !t.term.starts_with('"')) {
        let entity_type = if term.is_relation { "RELATIONS" } else { "NODES" };
        let uri = term.term.trim_start_matches('<').trim_end_matches('>');
        let label = labels.get(uri).map(String::as_str).unwrap_or("None");
        writeln!(table, "{}\t{}\t{}\t{}", entity_type, term.id, uri, label)?;
    }
    table.flush()?;

    Ok(artifacts)
}

/// First `rdfs:label` per IRI.
fn node_labels(graph: &KnowledgeGraph) -> HashMap<&str, String> {
    let mut labels = HashMap::new();
    for triple in graph.iter().filter(|t| t.predicate == RDFS_LABEL) {
        if let (Some(iri), Node::Literal { value, .. }) = (triple.subject.as_iri(), &triple.object) {
            labels.entry(iri).or_insert_with(|| value.clone());
        }
    }
    labels
}
