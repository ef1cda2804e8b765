//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hexago-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{RenderContext, SourceLocation, SourceTier, TemplateName};
use crate::error::HexagoResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hexago_adapters::filesystem::LocalFilesystem` (production)
/// - `hexago_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HexagoResult<()>;

    /// Write bytes to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &[u8]) -> HexagoResult<()>;

    fn read_file(&self, path: &Path) -> HexagoResult<Vec<u8>>;

    fn remove_file(&self, path: &Path) -> HexagoResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Every regular file below `root`, sorted by path.
    fn walk_files(&self, root: &Path) -> HexagoResult<Vec<PathBuf>>;
}

/// Port for one tier of template content.
///
/// Implemented by:
/// - `hexago_adapters::sources::DirectorySource` (binary-local, project-local, user-global)
/// - `hexago_adapters::sources::EmbeddedSource` (bundle compiled into the binary)
/// - `hexago_adapters::sources::MemorySource` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    fn tier(&self) -> SourceTier;

    fn exists(&self, name: &TemplateName) -> bool;

    /// Raw template bytes. Callers check `exists` first.
    fn read(&self, name: &TemplateName) -> HexagoResult<Vec<u8>>;

    /// Where `name` lives (or would live) in this source.
    fn location(&self, name: &TemplateName) -> SourceLocation;

    /// Base directory for filesystem-backed sources.
    fn base_dir(&self) -> Option<PathBuf>;

    /// Names this source can enumerate. Only the embedded bundle is
    /// authoritative; directory sources return nothing.
    fn catalogue(&self) -> Vec<TemplateName>;
}

/// Port for parsing template text without rendering it.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSyntaxChecker: Send + Sync {
    /// `Ok` when `content` parses; otherwise `ApplicationError::TemplateSyntax`.
    fn check(&self, name: &str, source_label: &str, content: &str) -> HexagoResult<()>;
}

/// Port for rendering a resolved template against component data.
///
/// Implemented by `hexago_adapters::TemplateLoader`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Fails with `ContextMismatch` when `context` is not the kind the
    /// template's group expects.
    fn render_context(&self, name: &TemplateName, context: &RenderContext) -> HexagoResult<String>;
}
