//! PKT Storage - build artifact staging and archiving
//!
//! Builds read their inputs from, and archive their outputs to, an artifact
//! store behind the `BuildStorage` port. The engine itself only ever sees
//! local paths.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pkt_storage::{BuildStorage, LocalDirectoryStorage};
//!
//! let storage = LocalDirectoryStorage::new("/data/pkt/archive")?;
//! for name in storage.list("resources/")? {
//!     let local = storage.fetch(&name)?;
//!     // copy into the build's resources directory
//! }
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{artifact_path, BuildStorage, StoredArtifact};
pub use infrastructure::LocalDirectoryStorage;
