//! Source Chain - priority-ordered template resolution.
//!
//! The chain holds at most one source per tier, always iterated in
//! ascending priority:
//!
//! ```text
//!   1 binary-local   <exe-dir>/templates/<name>
//!   2 project-local  <root>/.hexago/templates/<name>
//!   3 user-global    <home>/.hexago/templates/<name>
//!   4 embedded       templates/<name> (compiled in)
//! ```
//!
//! The first source whose `exists` is true wins. Nothing here caches; the
//! parse cache lives in the template loader adapter.

use tracing::{debug, instrument, trace};

use crate::{
    application::{ApplicationError, ports::TemplateSource},
    domain::{SourceLocation, SourceTier, TemplateName},
    error::HexagoResult,
};

/// Winning source and its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub location: SourceLocation,
    pub content: Vec<u8>,
}

pub struct SourceChain {
    sources: Vec<Box<dyn TemplateSource>>,
}

impl SourceChain {
    /// Build a chain; sources are re-ordered by tier priority.
    pub fn new(mut sources: Vec<Box<dyn TemplateSource>>) -> Self {
        sources.sort_by_key(|s| s.tier());
        Self { sources }
    }

    /// Iterate sources in priority order.
    pub fn sources(&self) -> impl Iterator<Item = &dyn TemplateSource> {
        self.sources.iter().map(|s| s.as_ref())
    }

    /// The source registered for `tier`, if any.
    pub fn source(&self, tier: SourceTier) -> Option<&dyn TemplateSource> {
        self.sources().find(|s| s.tier() == tier)
    }

    fn winner(&self, name: &TemplateName) -> Option<&dyn TemplateSource> {
        self.sources().find(|s| {
            let hit = s.exists(name);
            trace!(template = %name, tier = %s.tier(), hit, "checked tier");
            hit
        })
    }

    /// First source that has `name`, with its content.
    #[instrument(skip(self), fields(template = %name))]
    pub fn resolve(&self, name: &TemplateName) -> HexagoResult<Resolved> {
        let source = self.winner(name).ok_or_else(|| not_found(name))?;
        let content = source.read(name)?;
        let location = source.location(name);
        debug!(source = %location, bytes = content.len(), "resolved template");
        Ok(Resolved { location, content })
    }

    /// Where `name` would be loaded from, without reading it.
    pub fn which(&self, name: &TemplateName) -> HexagoResult<SourceLocation> {
        self.winner(name)
            .map(|s| s.location(name))
            .ok_or_else(|| not_found(name))
    }

    pub fn exists(&self, name: &TemplateName) -> bool {
        self.winner(name).is_some()
    }

    /// Sorted names from the embedded bundle. Overrides never add names.
    pub fn list(&self) -> Vec<TemplateName> {
        let mut names: Vec<TemplateName> = self
            .sources()
            .filter(|s| s.tier() == SourceTier::Embedded)
            .flat_map(|s| s.catalogue())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl std::fmt::Debug for SourceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources().map(|s| s.tier()))
            .finish()
    }
}

fn not_found(name: &TemplateName) -> crate::error::HexagoError {
    ApplicationError::TemplateNotFound {
        name: name.to_string(),
    }
    .into()
}
