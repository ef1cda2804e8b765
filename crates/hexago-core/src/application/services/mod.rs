//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to resolve templates,
//! manage overrides, generate components and validate generated projects.

pub mod architecture_validator;
pub mod component_generator;
pub mod override_service;
pub mod source_chain;

pub use architecture_validator::ArchitectureValidator;
pub use component_generator::{ComponentGenerator, Generated};
pub use override_service::{ExportSummary, Exported, OverrideService};
pub use source_chain::{Resolved, SourceChain};
