//! Edge construction domain models

pub mod edge_spec;
pub mod error_log;
pub mod metadata;
pub mod statistics;

pub use edge_spec::{DataType, EdgeSpec, EdgeSpecDocument, NodeKind};
pub use error_log::ErrorLog;
pub use metadata::{MetadataEntry, NodeMetadata};
pub use statistics::EdgeStatistics;
