//! Infrastructure layer - Storage adapters

pub mod local;

pub use local::LocalDirectoryStorage;
