// Axiom Pattern Builder
//
// Maps (subject, object, relation, inverse, mode) to the literal triples of
// the OWL pattern for that edge. Purely structural: no subclass map, no
// vocabulary lookups. Callers validate before building.
//
// Cardinalities are fixed per mode and counted downstream:
// - subclass: 9 triples per direction (9 without inverse, 18 with)
// - instance: 6 triples, plus 2 with inverse

use sha2::{Digest, Sha256};

use crate::config::ConstructionApproach;
use crate::shared::vocab::{
    ns, OWL_CLASS, OWL_NAMED_INDIVIDUAL, OWL_OBJECT_PROPERTY, OWL_ON_PROPERTY, OWL_RESTRICTION,
    OWL_SOME_VALUES_FROM, OWL_THING, RDFS_SUBCLASS_OF, RDF_TYPE,
};
use crate::shared::{Node, Triple};

pub const SUBCLASS_PATTERN_SIZE: usize = 9;
pub const INSTANCE_PATTERN_SIZE: usize = 6;
pub const INSTANCE_INVERSE_EXTENSION: usize = 2;

/// Build the triples for one edge.
pub fn build(
    subject: &str,
    object: &str,
    relation: &str,
    inverse: Option<&str>,
    mode: ConstructionApproach,
) -> Vec<Triple> {
    match mode {
        ConstructionApproach::Subclass => AxiomPatternBuilder::subclass(subject, object, relation, inverse),
        ConstructionApproach::Instance => AxiomPatternBuilder::instance(subject, object, relation, inverse),
    }
}

/// Deterministic restriction node for one direction of an edge.
///
/// The hash input is ordered, so `(s, p, o)` and `(o, q, s)` never collide
/// even when `p == q`.
pub fn restriction_node(subject: &str, relation: &str, object: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(subject.as_bytes());
    hasher.update(b"|");
    hasher.update(relation.as_bytes());
    hasher.update(b"|");
    hasher.update(object.as_bytes());

    // First 16 bytes (32 hex chars)
    format!("{}N{}", ns::PKT, &format!("{:x}", hasher.finalize())[..32])
}

/// True for nodes minted by `restriction_node`.
pub fn is_restriction_node(iri: &str) -> bool {
    iri.strip_prefix(ns::PKT)
        .map(|rest| rest.starts_with('N'))
        .unwrap_or(false)
}

pub struct AxiomPatternBuilder;

impl AxiomPatternBuilder {
    /// Existential restriction pattern, mirrored when an inverse is given.
    pub fn subclass(subject: &str, object: &str, relation: &str, inverse: Option<&str>) -> Vec<Triple> {
        let mut triples = Vec::with_capacity(SUBCLASS_PATTERN_SIZE * 2);
        Self::restriction_direction(&mut triples, subject, relation, object);
        if let Some(inverse) = inverse {
            Self::restriction_direction(&mut triples, object, inverse, subject);
        }
        triples
    }

    /// Direct assertion pattern. The inverse adds one reverse assertion and
    /// its property declaration, nothing mirrored.
    pub fn instance(subject: &str, object: &str, relation: &str, inverse: Option<&str>) -> Vec<Triple> {
        let mut triples = vec![
            Triple::iris(subject, RDF_TYPE, OWL_NAMED_INDIVIDUAL),
            Triple::iris(subject, RDF_TYPE, OWL_THING),
            Triple::iris(object, RDF_TYPE, OWL_NAMED_INDIVIDUAL),
            Triple::iris(object, RDF_TYPE, OWL_THING),
            Triple::iris(relation, RDF_TYPE, OWL_OBJECT_PROPERTY),
            Triple::iris(subject, relation, object),
        ];
        if let Some(inverse) = inverse {
            triples.push(Triple::iris(inverse, RDF_TYPE, OWL_OBJECT_PROPERTY));
            triples.push(Triple::iris(object, inverse, subject));
        }
        triples
    }

    fn restriction_direction(out: &mut Vec<Triple>, subject: &str, relation: &str, object: &str) {
        let restriction = restriction_node(subject, relation, object);
        let r = restriction.as_str();

        out.push(Triple::iris(subject, RDF_TYPE, OWL_CLASS));
        out.push(Triple::iris(r, RDF_TYPE, OWL_RESTRICTION));
        out.push(Triple::new(Node::iri(r), OWL_SOME_VALUES_FROM, Node::iri(object)));
        out.push(Triple::iris(object, RDF_TYPE, OWL_CLASS));
        out.push(Triple::iris(r, OWL_ON_PROPERTY, relation));
        out.push(Triple::iris(relation, RDF_TYPE, OWL_OBJECT_PROPERTY));
        out.push(Triple::iris(subject, RDFS_SUBCLASS_OF, r));
        // Named-restriction declarations, dropped once the node is anonymized
        out.push(Triple::iris(r, RDF_TYPE, OWL_CLASS));
        out.push(Triple::iris(r, RDFS_SUBCLASS_OF, OWL_THING));
    }
}
