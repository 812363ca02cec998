// Logic / Annotation Split
//
// Annotation triples: any triple whose predicate is an annotation property
// (declared in the graph or well-known), plus the declarations themselves.
// Logic triples: everything else.

use rayon::prelude::*;
use std::collections::HashSet;

use crate::shared::vocab::{OWL_ANNOTATION_PROPERTY, RDF_TYPE, WELL_KNOWN_ANNOTATIONS};
use crate::shared::{KnowledgeGraph, Node, Triple};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSplit {
    pub logic: KnowledgeGraph,
    pub annotations: KnowledgeGraph,
}

impl GraphSplit {
    pub fn total(&self) -> usize {
        self.logic.len() + self.annotations.len()
    }
}

/// Annotation predicates used by `graph`.
pub fn annotation_properties(graph: &KnowledgeGraph) -> HashSet<&str> {
    let mut props: HashSet<&str> = WELL_KNOWN_ANNOTATIONS.iter().copied().collect();
    props.extend(
        graph
            .subjects_of_type(OWL_ANNOTATION_PROPERTY)
            .filter_map(Node::as_iri),
    );
    props
}

pub fn split_graph(graph: &KnowledgeGraph) -> GraphSplit {
    let props = annotation_properties(graph);
    let is_annotation = |t: &Triple| {
        props.contains(t.predicate.as_str())
            || (t.predicate == RDF_TYPE && t.object.as_iri() == Some(OWL_ANNOTATION_PROPERTY))
    };

    let (annotations, logic): (Vec<Triple>, Vec<Triple>) = graph
        .triples()
        .par_iter()
        .cloned()
        .partition(|t| is_annotation(t));

    GraphSplit {
        logic: logic.into_iter().collect(),
        annotations: annotations.into_iter().collect(),
    }
}
