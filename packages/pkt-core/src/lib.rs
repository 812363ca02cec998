/*
 * PheKnowLator Core - Knowledge Graph Edge Construction
 *
 * Feature-First Hexagonal Architecture:
 * - shared/   : RDF model and vocabulary constants
 * - config/   : Build options, validation, resource layout
 * - features/ : Vertical slices (patterns → resolution → construction → post-processing)
 *
 * Parallel orchestration lives in pkt-orchestration.
 */

#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::new_without_default)]

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{BuildConfig, BuildOptions, BuildVariant, ConfigError, ConstructionApproach, Toggle};
pub use errors::{KgError, Result};
pub use shared::{KnowledgeGraph, Node, Triple};
