//! Application layer for hexago.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SourceChain, OverrideService, ComponentGenerator,
//!   ArchitectureValidator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArchitectureValidator, ComponentGenerator, ExportSummary, Exported, Generated,
    OverrideService, Resolved, SourceChain,
};

pub use ports::{Filesystem, TemplateRenderer, TemplateSource, TemplateSyntaxChecker};

pub use error::ApplicationError;
