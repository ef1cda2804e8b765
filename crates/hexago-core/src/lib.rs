//! hexago Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the hexago Go scaffolding tool:
//! tiered template resolution, override management, component generation
//! and dependency direction validation.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           hexago-cli (CLI)              │
//! │  (add / templates / validate / config)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (SourceChain, OverrideService,          │
//! │  ComponentGenerator,                    │
//! │  ArchitectureValidator)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (TemplateSource, Filesystem,            │
//! │  TemplateSyntaxChecker,                 │
//! │  TemplateRenderer)                      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hexago-adapters (Infrastructure)    │
//! │ (DirectorySource, EmbeddedSource,       │
//! │  TemplateLoader, LocalFilesystem)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (TemplateName, LayerRule, scan_imports) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hexago_core::prelude::*;
//!
//! let chain = SourceChain::new(sources);
//! let name = TemplateName::new("service/service.go.tmpl")?;
//! println!("{}", chain.which(&name)?);
//!
//! let report = ArchitectureValidator::new(fs, ".", layout).validate();
//! assert!(!report.has_errors());
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        ArchitectureValidator, ComponentGenerator, ExportSummary, Generated, OverrideService,
        SourceChain,
        ports::{Filesystem, TemplateRenderer, TemplateSource, TemplateSyntaxChecker},
    };
    pub use crate::domain::{
        AdapterDirection, AdapterStyle, ComponentName, ContextKind, CoreLogic, OverrideTier,
        ProjectLayout, RenderContext, SourceLocation, SourceTier, TemplateData, TemplateName,
        ValidationReport,
    };
    pub use crate::error::{HexagoError, HexagoResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
