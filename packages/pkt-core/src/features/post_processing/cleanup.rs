// Namespace Cleanup
//
// Restriction nodes are minted as pkt-namespace IRIs so fragments can be
// unioned without blank-node collisions. Once the graph is merged they are
// rewritten to blank nodes, and the two declarations that only make sense for
// a named restriction are removed.

use tracing::debug;

use crate::features::axiom_patterns::is_restriction_node;
use crate::shared::vocab::{ns, OWL_CLASS, OWL_THING, RDFS_SUBCLASS_OF, RDF_TYPE};
use crate::shared::{KnowledgeGraph, Node, Triple};

/// Rewrite pkt restriction IRIs to blank nodes.
pub fn anonymize_restrictions(graph: KnowledgeGraph) -> KnowledgeGraph {
    let before = graph.len();
    let cleaned: KnowledgeGraph = graph
        .into_iter()
        .filter(|t| !is_named_restriction_declaration(t))
        .map(|t| Triple::new(anonymize(t.subject), t.predicate, anonymize(t.object)))
        .collect();
    debug!(
        "Namespace cleanup: {} -> {} triples",
        before,
        cleaned.len()
    );
    cleaned
}

fn anonymize(node: Node) -> Node {
    match node {
        Node::Iri(iri) if is_restriction_node(&iri) => {
            let label = iri.strip_prefix(ns::PKT).unwrap_or(&iri).to_string();
            Node::Blank(label)
        }
        other => other,
    }
}

fn is_named_restriction_declaration(triple: &Triple) -> bool {
    let restriction = triple
        .subject
        .as_iri()
        .map(is_restriction_node)
        .unwrap_or(false);
    restriction
        && matches!(
            (triple.predicate.as_str(), triple.object.as_iri()),
            (RDF_TYPE, Some(OWL_CLASS)) | (RDFS_SUBCLASS_OF, Some(OWL_THING))
        )
}
