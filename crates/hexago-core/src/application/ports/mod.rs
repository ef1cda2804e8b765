//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hexago-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateSource`: One tier of template content
//!   - `TemplateSyntaxChecker`: Parse-only template validation
//!   - `TemplateRenderer`: Render a template for a generated component
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{Filesystem, TemplateRenderer, TemplateSource, TemplateSyntaxChecker};

#[cfg(test)]
pub use output::{
    MockFilesystem, MockTemplateRenderer, MockTemplateSource, MockTemplateSyntaxChecker,
};
