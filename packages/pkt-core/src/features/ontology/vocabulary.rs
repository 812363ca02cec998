// Ontology Vocabulary
//
// OntologyClassSet / ObjectPropertySet extracted from the merged ontology.
// Read-mostly: workers take their own copy of the property set and may
// auto-declare new, well-formed relations into it.

use oxigraph::model::NamedNode;
use std::collections::HashSet;

use crate::errors::{KgError, Result};
use crate::shared::vocab::{is_absolute, OWL_CLASS, OWL_OBJECT_PROPERTY};
use crate::shared::KnowledgeGraph;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyVocabulary {
    pub classes: HashSet<String>,
    pub object_properties: HashSet<String>,
}

impl OntologyVocabulary {
    pub fn from_graph(graph: &KnowledgeGraph) -> Self {
        let iris = |class_iri: &str| {
            graph
                .subjects_of_type(class_iri)
                .filter_map(|n| n.as_iri().map(str::to_string))
                .collect::<HashSet<_>>()
        };
        Self {
            classes: iris(OWL_CLASS),
            object_properties: iris(OWL_OBJECT_PROPERTY),
        }
    }

    pub fn contains_class(&self, iri: &str) -> bool {
        self.classes.contains(iri)
    }

    pub fn contains_property(&self, iri: &str) -> bool {
        self.object_properties.contains(iri)
    }
}

/// Reject relation ids that are not absolute, well-formed IRIs.
pub fn validate_relation_iri(iri: &str) -> Result<()> {
    if !is_absolute(iri) {
        return Err(KgError::validation(format!(
            "relation '{}' is not an absolute IRI",
            iri
        )));
    }
    NamedNode::new(iri)
        .map(|_| ())
        .map_err(|e| KgError::validation(format!("relation '{}' is malformed: {}", iri, e)))
}
