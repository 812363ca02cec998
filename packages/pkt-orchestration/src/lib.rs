/*
 * PheKnowLator Orchestration - Knowledge Graph Build Pipeline
 *
 * Drives one knowledge graph build from validated options to serialized
 * outputs.
 *
 * Architecture:
 * - Build State Machine (Full / Partial / PostClosure)
 * - Build Coordinator (static partitioning over a rayon pool)
 * - Output Naming (pure function of variant and flags)
 * - OWL Decoder port (built-in restriction decoder)
 * - Storage staging (BuildStorage port)
 */

// Public modules
pub mod coordinator;
pub mod decoder;
pub mod error;
pub mod naming;
pub mod staging;
pub mod state_machine;

// Re-exports
pub use coordinator::{BuildCoordinator, CoordinatorOutput};
pub use decoder::{DecodedGraphs, OwlDecoder, RestrictionDecoder};
pub use error::{OrchestratorError, Result};
pub use naming::OutputNames;
pub use staging::{archive_outputs, stage_resources};
pub use state_machine::{BuildReport, BuildStage, BuildStateMachine, StageTiming};
