//! Feature modules
//!
//! - axiom_patterns    - OWL triple shapes per edge
//! - subclass_map      - raw id → ontology class lookup
//! - ontology          - loading, vocabulary, relations, merging
//! - edge_construction - edge specification and the per-worker builder
//! - post_processing   - namespace cleanup, logic/annotation split
//! - serialization     - N-Triples and integer-encoded outputs

pub mod axiom_patterns;
pub mod edge_construction;
pub mod ontology;
pub mod post_processing;
pub mod serialization;
pub mod subclass_map;
