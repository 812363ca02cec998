//! RDF/XML writer for the main `.owl` artifact
//!
//! Terms are converted into oxigraph's model and streamed through its
//! RDF/XML serializer in graph order.

use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::{BlankNode, Literal, NamedNode, Term, Triple as RdfTriple};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{KgError, Result};
use crate::shared::vocab::ns;
use crate::shared::{KnowledgeGraph, Node, Triple};

const PREFIXES: [(&str, &str); 5] = [
    ("rdf", ns::RDF),
    ("rdfs", ns::RDFS),
    ("owl", ns::OWL),
    ("obo", ns::OBO),
    ("pkt", ns::PKT),
];

/// Write `graph` to `path` as RDF/XML, creating parent directories. Returns the triple count.
pub fn write_rdfxml(graph: &KnowledgeGraph, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let origin = path.display();

    let mut serializer = RdfSerializer::from_format(RdfFormat::RdfXml);
    for (name, iri) in PREFIXES {
        serializer = serializer
            .with_prefix(name, iri)
            .map_err(|e| KgError::rdf_serialize(&origin, e))?;
    }
    let mut writer = serializer.for_writer(BufWriter::new(File::create(path)?));
    for triple in graph {
        let triple = to_rdf(triple).map_err(|e| KgError::rdf_serialize(&origin, e))?;
        writer.serialize_triple(&triple)?;
    }
    writer.finish()?.flush()?;
    Ok(graph.len())
}

fn to_rdf(triple: &Triple) -> std::result::Result<RdfTriple, String> {
    let predicate = named(&triple.predicate)?;
    let object = term(&triple.object)?;
    match &triple.subject {
        Node::Iri(iri) => Ok(RdfTriple::new(named(iri)?, predicate, object)),
        Node::Blank(id) => Ok(RdfTriple::new(blank(id)?, predicate, object)),
        Node::Literal { value, .. } => Err(format!("literal subject \"{}\"", value)),
    }
}

fn term(node: &Node) -> std::result::Result<Term, String> {
    let term = match node {
        Node::Iri(iri) => named(iri)?.into(),
        Node::Blank(id) => blank(id)?.into(),
        Node::Literal {
            value,
            datatype,
            language,
        } => match (language, datatype) {
            (Some(language), _) => Literal::new_language_tagged_literal(value.as_str(), language.as_str())
                .map_err(|e| format!("language tag '{}': {}", language, e))?
                .into(),
            (None, Some(datatype)) => Literal::new_typed_literal(value.as_str(), named(datatype)?).into(),
            (None, None) => Literal::new_simple_literal(value.as_str()).into(),
        },
    };
    Ok(term)
}

fn named(iri: &str) -> std::result::Result<NamedNode, String> {
    NamedNode::new(iri).map_err(|e| format!("IRI '{}': {}", iri, e))
}

fn blank(id: &str) -> std::result::Result<BlankNode, String> {
    BlankNode::new(id).map_err(|e| format!("blank node '{}': {}", id, e))
}
