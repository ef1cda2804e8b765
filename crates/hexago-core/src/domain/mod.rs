//! Core domain layer for hexago.
//!
//! Pure logic only: template naming and tiers, the project naming
//! convention, layer dependency rules, the Go import scanner and the
//! validation report. All I/O and template parsing live behind ports
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: no filesystem, network or process calls
//! - **Synchronous**: nothing here blocks or spawns
//! - **Minimal crates**: std, `thiserror` and `serde` derives
//! - **Value types**: everything is `Clone + PartialEq`

pub mod case;
pub mod component;
pub mod context;
pub mod error;
pub mod imports;
pub mod layout;
pub mod report;
pub mod rules;
pub mod template;

pub use component::{AdapterDirection, ComponentName, parse_fields};
pub use context::{
    AdapterContext, ContextKind, DomainContext, FieldSpec, ProjectContext, RenderContext,
    ServiceContext, TemplateData,
};
pub use error::{DomainError, ErrorCategory};
pub use imports::{ImportScanError, scan_imports};
pub use layout::{AdapterStyle, CoreLogic, ProjectLayout};
pub use report::ValidationReport;
pub use rules::{Layer, LayerRule, Verdict};
pub use template::{OverrideTier, SourceLocation, SourceTier, TemplateName};
