// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to carry into reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName { name: String, reason: String },

    #[error("Invalid component name '{name}': {reason}")]
    InvalidComponentName { name: String, reason: String },

    #[error("Invalid field '{entry}': {reason}")]
    InvalidFieldSpec { entry: String, reason: String },

    #[error("Unknown adapter direction '{value}'")]
    UnknownAdapterDirection { value: String },

    #[error("No {direction} adapter template for '{value}'")]
    UnknownAdapterType {
        direction: String,
        value: String,
        valid: Vec<String>,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Unknown adapter style '{value}'")]
    UnknownAdapterStyle { value: String },

    #[error("Unknown core logic naming '{value}'")]
    UnknownCoreLogic { value: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Not a hexagonal project at {path}: {reason}")]
    ProjectNotDetected { path: PathBuf, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplateName { .. } => vec![
                "Template names are relative, slash-separated paths".into(),
                "Example: service/service.go.tmpl".into(),
                "Try: hexago templates list".into(),
            ],
            Self::InvalidComponentName { .. } => vec![
                "Names must be Go identifiers".into(),
                "Example: CreateOrder".into(),
            ],
            Self::InvalidFieldSpec { .. } => vec![
                "Fields are comma-separated name:type pairs".into(),
                "Example: --fields \"email:string,createdAt:time.Time\"".into(),
            ],
            Self::UnknownAdapterDirection { .. } => vec![
                "Use primary (driver) or secondary (driven)".into(),
            ],
            Self::UnknownAdapterType { valid, .. } => vec![
                format!("Available: {}", valid.join(", ")),
                "Export and edit a template to add your own: hexago templates list".into(),
            ],
            Self::UnknownAdapterStyle { value } => vec![
                format!("'{value}' is not a recognised adapter style"),
                "Supported styles:".into(),
                "  • primary-secondary".into(),
                "  • driver-driven".into(),
                "Check structure.adapter_style in .hexago.yaml".into(),
            ],
            Self::UnknownCoreLogic { value } => vec![
                format!("'{value}' is not a recognised business logic directory"),
                "Supported values: services, usecases".into(),
                "Check structure.core_logic in .hexago.yaml".into(),
            ],
            Self::ProjectNotDetected { path, .. } => vec![
                format!("Looked in: {}", path.display()),
                "Run the command from the project root or pass --path".into(),
                "Projects need a .hexago.yaml or a go.mod plus internal/core".into(),
            ],
            Self::MissingRequiredField { field } => vec![format!("Provide a value for '{field}'")],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplateName { .. }
            | Self::InvalidComponentName { .. }
            | Self::InvalidFieldSpec { .. }
            | Self::UnknownAdapterDirection { .. }
            | Self::UnknownAdapterType { .. } => ErrorCategory::Validation,
            Self::UnknownAdapterStyle { .. }
            | Self::UnknownCoreLogic { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Configuration,
            Self::ProjectNotDetected { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
