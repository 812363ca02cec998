// Ontology
//
// Everything the engine reads from reference ontologies:
// - loader: RDF parsing into KnowledgeGraph
// - vocabulary: class / object-property sets of the merged ontology
// - relations: relation labels and inverse relations
// - merge: external merge tool port and adapters

pub mod loader;
pub mod merge;
pub mod relations;
pub mod vocabulary;

pub use loader::{detect_format, load_graph};
pub use merge::{ensure_merged, list_ontology_files, CommandMerger, OntologyMerger, UnionMerger};
pub use relations::{local_id, RelationDictionaries};
pub use vocabulary::{validate_relation_iri, OntologyVocabulary};
