//! Build configuration
//!
//! ```rust,ignore
//! use pkt_core::config::{BuildConfig, BuildOptions, BuildVariant};
//!
//! let options = BuildOptions::new("./resources")
//!     .with_approach("subclass")
//!     .with_inverse_relations("yes")
//!     .with_decode_owl("no");
//! let config = BuildConfig::from_options(BuildVariant::Full, &options)?;
//! ```

pub mod build_config;
pub mod error;
pub mod resources;

pub use build_config::{
    default_workers, BuildConfig, BuildOptions, BuildVariant, ConstructionApproach, Toggle,
};
pub use error::{ConfigError, ConfigResult};
pub use resources::ResourcePaths;
