//! Edge construction feature
//!
//! Turns the edge specification into graph fragments, one worker at a time.
//!
//! ```text
//! EdgeSpecDocument ──► EdgeTask ──► EdgeTypeWorker ──► WorkerOutput
//!                                     │   ▲
//!                      SubclassResolver   OntologyVocabulary
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pkt_core::features::edge_construction::{EdgeTask, EdgeTypeWorker, WorkerContext};
//!
//! let tasks: Vec<EdgeTask> = document.edges.into_values().map(EdgeTask::new).collect();
//! let output = EdgeTypeWorker::run(ctx, &tasks)?;
//! ```

pub mod application;
pub mod domain;

pub use application::{EdgeTask, EdgeTypeWorker, WorkerContext, WorkerOutput};
pub use domain::{
    DataType, EdgeSpec, EdgeSpecDocument, EdgeStatistics, ErrorLog, MetadataEntry, NodeKind,
    NodeMetadata,
};
