//! Graph serialization
//!
//! - ntriples: sorted N-Triples documents
//! - rdfxml: RDF/XML for the main `.owl` artifact
//! - integer_map: integer triples, identifier map and node-label table

pub mod integer_map;
pub mod ntriples;
pub mod rdfxml;

pub use integer_map::{write_encoded_artifacts, EncodedArtifacts, IntegerEncoding};
pub use ntriples::{to_ntriples, write_ntriples};
pub use rdfxml::write_rdfxml;
