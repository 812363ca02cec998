//! OWL decoding
//!
//! `OwlDecoder` is the port to the OWL-NETS stage. `RestrictionDecoder` is the
//! built-in adapter: it collapses `s ⊑ ∃p.o` restrictions into direct `s p o`
//! edges and drops the OWL scaffolding, annotations and blank nodes.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use pkt_core::config::ConstructionApproach;
use pkt_core::features::axiom_patterns::is_restriction_node;
use pkt_core::features::post_processing::annotation_properties;
use pkt_core::shared::vocab::{ns, OWL_ON_PROPERTY, OWL_SOME_VALUES_FROM, RDFS_SUBCLASS_OF, RDF_TYPE};
use pkt_core::{KnowledgeGraph, Node, Triple};

use crate::error::Result;

/// Output of the decoding stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedGraphs {
    pub owlnets: KnowledgeGraph,
    /// OWL-NETS with typing edges unified to the construction approach
    pub purified: KnowledgeGraph,
}

pub trait OwlDecoder: Send + Sync {
    fn decode(&self, graph: &KnowledgeGraph, approach: ConstructionApproach) -> Result<DecodedGraphs>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictionDecoder;

impl RestrictionDecoder {
    pub fn owlnets(graph: &KnowledgeGraph) -> KnowledgeGraph {
        let mut on_property: HashMap<&Node, &str> = HashMap::new();
        let mut filler: HashMap<&Node, &Node> = HashMap::new();
        for triple in graph {
            match triple.predicate.as_str() {
                OWL_ON_PROPERTY => {
                    if let Some(property) = triple.object.as_iri() {
                        on_property.insert(&triple.subject, property);
                    }
                }
                OWL_SOME_VALUES_FROM if triple.object.is_iri() => {
                    filler.insert(&triple.subject, &triple.object);
                }
                _ => {}
            }
        }

        let annotations = annotation_properties(graph);
        let mut decoded = KnowledgeGraph::new();
        let mut collapsed = 0usize;
        for triple in graph {
            if triple.predicate == RDFS_SUBCLASS_OF && is_plain_iri(&triple.subject) {
                if let (Some(property), Some(object)) =
                    (on_property.get(&triple.object), filler.get(&triple.object))
                {
                    decoded.insert(Triple::new(triple.subject.clone(), *property, (*object).clone()));
                    collapsed += 1;
                    continue;
                }
            }
            if keep_direct(triple, &annotations) {
                decoded.insert(triple.clone());
            }
        }
        debug!(
            "OWL-NETS: {} restrictions collapsed, {} -> {} triples",
            collapsed,
            graph.len(),
            decoded.len()
        );
        decoded
    }

    /// Rewrite typing edges between IRIs to the approach's predicate.
    pub fn purify(owlnets: &KnowledgeGraph, approach: ConstructionApproach) -> KnowledgeGraph {
        let (from, to) = match approach {
            ConstructionApproach::Subclass => (RDF_TYPE, RDFS_SUBCLASS_OF),
            ConstructionApproach::Instance => (RDFS_SUBCLASS_OF, RDF_TYPE),
        };
        owlnets
            .iter()
            .map(|t| {
                if t.predicate == from && t.subject.is_iri() && t.object.is_iri() {
                    Triple::new(t.subject.clone(), to, t.object.clone())
                } else {
                    t.clone()
                }
            })
            .collect()
    }
}

impl OwlDecoder for RestrictionDecoder {
    fn decode(&self, graph: &KnowledgeGraph, approach: ConstructionApproach) -> Result<DecodedGraphs> {
        let owlnets = Self::owlnets(graph);
        let purified = Self::purify(&owlnets, approach);
        Ok(DecodedGraphs { owlnets, purified })
    }
}

fn is_plain_iri(node: &Node) -> bool {
    node.as_iri()
        .map(|iri| !is_restriction_node(iri))
        .unwrap_or(false)
}

fn is_schema_iri(iri: &str) -> bool {
    [ns::OWL, ns::RDF, ns::RDFS].iter().any(|prefix| iri.starts_with(prefix))
}

/// Direct edges between domain IRIs survive decoding.
fn keep_direct(triple: &Triple, annotations: &HashSet<&str>) -> bool {
    let Some(object) = triple.object.as_iri() else {
        return false;
    };
    if !is_plain_iri(&triple.subject) || is_restriction_node(object) || is_schema_iri(object) {
        return false;
    }
    if annotations.contains(triple.predicate.as_str()) {
        return false;
    }
    let predicate = triple.predicate.as_str();
    predicate == RDF_TYPE || predicate == RDFS_SUBCLASS_OF || !is_schema_iri(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkt_core::features::axiom_patterns::build;
    use pkt_core::features::post_processing::anonymize_restrictions;
    use pkt_core::shared::vocab::{OWL_CLASS, RDFS_LABEL};

    const GENE: &str = "https://www.ncbi.nlm.nih.gov/gene/3";
    const SO: &str = "http://purl.obolibrary.org/obo/SO_0001217";
    const HP: &str = "http://purl.obolibrary.org/obo/HP_0000716";
    const RO: &str = "http://purl.obolibrary.org/obo/RO_0003302";

    fn subclass_graph() -> KnowledgeGraph {
        let mut graph: KnowledgeGraph = build(GENE, HP, RO, None, ConstructionApproach::Subclass)
            .into_iter()
            .collect();
        graph.insert(Triple::iris(GENE, RDFS_SUBCLASS_OF, SO));
        graph.insert(Triple::iris(SO, RDF_TYPE, OWL_CLASS));
        graph.insert(Triple::new(Node::iri(HP), RDFS_LABEL, Node::literal("Depression")));
        anonymize_restrictions(graph)
    }

    #[test]
    fn test_owlnets_collapses_restrictions() {
        let owlnets = RestrictionDecoder::owlnets(&subclass_graph());
        let expected: KnowledgeGraph = vec![
            Triple::iris(GENE, RO, HP),
            Triple::iris(GENE, RDFS_SUBCLASS_OF, SO),
        ]
        .into_iter()
        .collect();
        assert_eq!(owlnets, expected);
    }

    #[test]
    fn test_owlnets_on_named_restrictions() {
        // Same result before namespace cleanup
        let graph: KnowledgeGraph = build(GENE, HP, RO, None, ConstructionApproach::Subclass)
            .into_iter()
            .collect();
        let owlnets = RestrictionDecoder::owlnets(&graph);
        assert_eq!(owlnets.len(), 1);
        assert!(owlnets.contains(&Triple::iris(GENE, RO, HP)));
    }

    #[test]
    fn test_instance_decode_and_purify() {
        let mut graph: KnowledgeGraph = build(GENE, HP, RO, None, ConstructionApproach::Instance)
            .into_iter()
            .collect();
        graph.insert(Triple::iris(GENE, RDF_TYPE, SO));

        let decoded = RestrictionDecoder
            .decode(&graph, ConstructionApproach::Instance)
            .unwrap();
        assert_eq!(decoded.owlnets.len(), 2);
        assert!(decoded.owlnets.contains(&Triple::iris(GENE, RDF_TYPE, SO)));
        assert_eq!(decoded.purified, decoded.owlnets);

        let as_subclass = RestrictionDecoder::purify(&decoded.owlnets, ConstructionApproach::Subclass);
        assert!(as_subclass.contains(&Triple::iris(GENE, RDFS_SUBCLASS_OF, SO)));
        assert!(!as_subclass.contains(&Triple::iris(GENE, RDF_TYPE, SO)));
    }

    #[test]
    fn test_subclass_purify_rewrites_typing() {
        let mut graph = subclass_graph();
        graph.insert(Triple::iris(GENE, RDF_TYPE, SO));
        let decoded = RestrictionDecoder
            .decode(&graph, ConstructionApproach::Subclass)
            .unwrap();
        assert!(decoded.owlnets.contains(&Triple::iris(GENE, RDF_TYPE, SO)));
        assert!(!decoded.purified.contains(&Triple::iris(GENE, RDF_TYPE, SO)));
        assert_eq!(decoded.purified.len(), 2);
    }
}
