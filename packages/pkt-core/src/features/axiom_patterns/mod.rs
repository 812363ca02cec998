// Axiom Patterns
//
// Fixed RDF shapes encoding one semantic relation between two nodes:
// - subclass: existential restriction per direction (s ⊑ ∃p.o)
// - instance: direct property assertion between individuals

pub mod builder;

pub use builder::{build, is_restriction_node, restriction_node, AxiomPatternBuilder};
