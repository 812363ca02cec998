// Subclass Map
//
// Precomputed mapping from raw, non-ontology identifiers (genes, pathways,
// variants) to the ontology classes they are typed with.

pub mod resolver;

pub use resolver::SubclassResolver;
