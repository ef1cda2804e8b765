//! Infrastructure adapters for hexago.
//!
//! This crate implements the ports defined in `hexago-core::application::ports`.
//! It contains all external dependencies and I/O operations: the local and
//! in-memory filesystems, the four template source tiers, the minijinja
//! loader, and project detection.

pub mod filesystem;
pub mod project_config;
pub mod sources;
pub mod template_loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_config::{DetectedFrom, DetectedProject, ProjectDetector};
pub use sources::{DirectorySource, EmbeddedSource, MemorySource, SourcePaths, standard_chain};
pub use template_loader::{TemplateLoader, build_environment};
