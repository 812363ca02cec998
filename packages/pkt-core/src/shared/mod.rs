//! Shared building blocks used by every feature module

pub mod rdf;
pub mod vocab;

pub use rdf::{KnowledgeGraph, Node, Triple};
