//! Application layer errors.
//!
//! These errors represent failures in resolution, rendering and override
//! management. Invalid names and configuration values are `DomainError`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ContextKind;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No tier supplies the template.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Reset targeted a tier that holds no override.
    #[error("No override for {name} at {path}")]
    OverrideNotFound { name: String, path: PathBuf },

    /// Template content failed to parse.
    #[error("Template syntax error in {name} ({source_label}): {message}")]
    TemplateSyntax {
        name: String,
        source_label: String,
        message: String,
    },

    /// Template parsed but failed against the supplied data.
    #[error("Template execution failed for {name}: {message}")]
    TemplateExecution { name: String, message: String },

    /// Data of the wrong kind was passed for a template group.
    #[error("Template {name} expects {expected} data, got {actual}")]
    ContextMismatch {
        name: String,
        expected: ContextKind,
        actual: ContextKind,
    },

    /// Generation would replace a file that is already there.
    #[error("Refusing to overwrite existing file: {path}")]
    FileExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Parse cache lock poisoned.
    #[error("Template cache lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No source provides '{name}'"),
                "Try: hexago templates list".into(),
            ],
            Self::OverrideNotFound { path, .. } => vec![
                format!("Nothing to reset at {}", path.display()),
                "Use --global to target the user-global tier".into(),
                "Try: hexago templates which <name>".into(),
            ],
            Self::TemplateSyntax { source_label, .. } => vec![
                format!("The {source_label} copy of this template does not parse"),
                "Fix the file, or remove the override with: hexago templates reset <name>".into(),
            ],
            Self::TemplateExecution { .. } => vec![
                "The template references data that was not supplied".into(),
                "Compare the template with the embedded default: hexago templates export <name>"
                    .into(),
            ],
            Self::ContextMismatch { expected, .. } => {
                vec![format!("Render this template with {expected} data")]
            }
            Self::FileExists { path } => vec![
                format!("Delete {} first, or choose another name", path.display()),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have the required permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::OverrideNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::TemplateSyntax { .. }
            | Self::TemplateExecution { .. }
            | Self::ContextMismatch { .. }
            | Self::FileExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }

    /// Build a `FilesystemError` from any displayable failure.
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
