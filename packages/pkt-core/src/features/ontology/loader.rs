// Ontology Loader
//
// Parses RDF artifacts (RDF/XML, Turtle, N-Triples) into a KnowledgeGraph.
// Blank nodes are relabeled in order of first appearance so repeated loads
// of the same file yield identical graphs.

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Term;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::errors::{KgError, Result};
use crate::shared::vocab::XSD_STRING;
use crate::shared::{KnowledgeGraph, Node, Triple};

/// Guess the serialization from the first bytes, falling back to the extension.
pub fn detect_format(path: &Path) -> Result<RdfFormat> {
    let mut head = [0u8; 256];
    let read = File::open(path)?.read(&mut head)?;
    let text = String::from_utf8_lossy(&head[..read]);
    let text = text.trim_start_matches('\u{feff}').trim_start();

    if text.starts_with("<?xml") || text.starts_with("<rdf:RDF") || text.starts_with("<!DOCTYPE") {
        return Ok(RdfFormat::RdfXml);
    }
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("nt") => RdfFormat::NTriples,
        Some("rdf") | Some("xml") => RdfFormat::RdfXml,
        _ => RdfFormat::Turtle,
    };
    Ok(format)
}

/// Parse an RDF file into an ordered triple set.
pub fn load_graph(path: &Path) -> Result<KnowledgeGraph> {
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    let graph = parse_reader(reader, format, &path.display().to_string())?;
    debug!("Loaded {} triples from {}", graph.len(), path.display());
    Ok(graph)
}

/// Parse from any reader. `origin` is only used in error messages.
pub fn parse_reader<R: BufRead>(reader: R, format: RdfFormat, origin: &str) -> Result<KnowledgeGraph> {
    let mut graph = KnowledgeGraph::new();
    let mut blanks = BlankRelabeler::default();

    for quad in RdfParser::from_format(format).for_reader(reader) {
        let quad = quad.map_err(|e| KgError::rdf_parse(origin, e))?;
        let subject = blanks.node(Term::from(quad.subject));
        let object = blanks.node(quad.object);
        if let (Some(subject), Some(object)) = (subject, object) {
            graph.insert(Triple::new(subject, quad.predicate.into_string(), object));
        }
    }
    Ok(graph)
}

#[derive(Default)]
struct BlankRelabeler {
    labels: HashMap<String, String>,
}

impl BlankRelabeler {
    fn node(&mut self, term: Term) -> Option<Node> {
        match term {
            Term::NamedNode(n) => Some(Node::Iri(n.into_string())),
            Term::BlankNode(b) => {
                let next = self.labels.len();
                let label = self
                    .labels
                    .entry(b.as_str().to_string())
                    .or_insert_with(|| format!("b{}", next));
                Some(Node::Blank(label.clone()))
            }
            Term::Literal(l) => {
                let language = l.language().map(str::to_string);
                let datatype = match language {
                    Some(_) => None,
                    None if l.datatype().as_str() == XSD_STRING => None,
                    None => Some(l.datatype().as_str().to_string()),
                };
                Some(Node::Literal {
                    value: l.value().to_string(),
                    datatype,
                    language,
                })
            }
            // Quoted triples are not part of OWL 2 ontologies
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}
