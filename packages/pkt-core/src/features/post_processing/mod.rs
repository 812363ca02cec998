// Post-processing applied to the merged graph before it is written.

pub mod cleanup;
pub mod split;

pub use cleanup::anonymize_restrictions;
pub use split::{annotation_properties, split_graph, GraphSplit};
