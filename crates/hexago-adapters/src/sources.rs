//! Template source adapters, one per tier.
//!
//! ```text
//! binary-local   DirectorySource  <exe-dir>/templates
//! project-local  DirectorySource  <project>/.hexago/templates
//! user-global    DirectorySource  <home>/.hexago/templates
//! embedded       EmbeddedSource   crates/hexago-adapters/templates (compiled in)
//! ```
//!
//! [`standard_chain`] assembles all four in priority order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use include_dir::{Dir, DirEntry, include_dir};
use tracing::debug;

use hexago_core::{
    application::{ApplicationError, SourceChain, ports::Filesystem, ports::TemplateSource},
    domain::{SourceLocation, SourceTier, TemplateName},
    error::HexagoResult,
};

static BUNDLE: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Extension every listable template carries.
pub const TEMPLATE_EXT: &str = ".tmpl";

// ── Directory ─────────────────────────────────────────────────────────────────

/// A filesystem directory acting as one tier.
///
/// The directory does not need to exist; a missing base simply holds
/// nothing.
pub struct DirectorySource {
    tier: SourceTier,
    base: PathBuf,
    fs: Arc<dyn Filesystem>,
}

impl DirectorySource {
    pub fn new(tier: SourceTier, base: impl Into<PathBuf>, fs: Arc<dyn Filesystem>) -> Self {
        Self {
            tier,
            base: base.into(),
            fs,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl TemplateSource for DirectorySource {
    fn tier(&self) -> SourceTier {
        self.tier
    }

    fn exists(&self, name: &TemplateName) -> bool {
        self.fs.is_file(&name.under(&self.base))
    }

    fn read(&self, name: &TemplateName) -> HexagoResult<Vec<u8>> {
        self.fs.read_file(&name.under(&self.base))
    }

    fn location(&self, name: &TemplateName) -> SourceLocation {
        SourceLocation {
            tier: self.tier,
            path: Some(name.under(&self.base)),
        }
    }

    fn base_dir(&self) -> Option<PathBuf> {
        Some(self.base.clone())
    }

    fn catalogue(&self) -> Vec<TemplateName> {
        Vec::new()
    }
}

// ── Embedded ──────────────────────────────────────────────────────────────────

/// The template bundle compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    dir: &'static Dir<'static>,
}

impl EmbeddedSource {
    pub fn new() -> Self {
        Self { dir: &BUNDLE }
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSource for EmbeddedSource {
    fn tier(&self) -> SourceTier {
        SourceTier::Embedded
    }

    fn exists(&self, name: &TemplateName) -> bool {
        self.dir.get_file(name.as_str()).is_some()
    }

    fn read(&self, name: &TemplateName) -> HexagoResult<Vec<u8>> {
        self.dir
            .get_file(name.as_str())
            .map(|f| f.contents().to_vec())
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn location(&self, _name: &TemplateName) -> SourceLocation {
        SourceLocation {
            tier: SourceTier::Embedded,
            path: None,
        }
    }

    fn base_dir(&self) -> Option<PathBuf> {
        None
    }

    fn catalogue(&self) -> Vec<TemplateName> {
        let mut names = Vec::new();
        collect_templates(self.dir, &mut names);
        names.sort();
        names
    }
}

fn collect_templates(dir: &'static Dir<'static>, names: &mut Vec<TemplateName>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let path = file.path().to_string_lossy().replace('\\', "/");
                if !path.ends_with(TEMPLATE_EXT) {
                    continue;
                }
                match TemplateName::new(path) {
                    Ok(name) => names.push(name),
                    Err(e) => debug!(error = %e, "skipping bundled file"),
                }
            }
            DirEntry::Dir(subdir) => collect_templates(subdir, names),
        }
    }
}

// ── Memory ────────────────────────────────────────────────────────────────────

/// An in-memory tier for tests. Clones share content, so a test can add an
/// override after the chain has been built.
#[derive(Debug, Clone)]
pub struct MemorySource {
    tier: SourceTier,
    base: Option<PathBuf>,
    templates: Arc<std::sync::RwLock<BTreeMap<TemplateName, String>>>,
}

impl MemorySource {
    pub fn new(tier: SourceTier) -> Self {
        Self {
            tier,
            base: None,
            templates: Arc::default(),
        }
    }

    /// Report `base` as this tier's directory.
    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_template(self, name: &str, content: &str) -> Self {
        self.insert(name, content);
        self
    }

    /// Add or replace a template. Invalid names are ignored.
    pub fn insert(&self, name: &str, content: &str) {
        let Ok(name) = TemplateName::new(name) else {
            return;
        };
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(name, content.to_owned());
        }
    }

    fn get(&self, name: &TemplateName) -> Option<String> {
        self.templates.read().ok()?.get(name).cloned()
    }
}

impl TemplateSource for MemorySource {
    fn tier(&self) -> SourceTier {
        self.tier
    }

    fn exists(&self, name: &TemplateName) -> bool {
        self.get(name).is_some()
    }

    fn read(&self, name: &TemplateName) -> HexagoResult<Vec<u8>> {
        self.get(name).map(String::into_bytes).ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn location(&self, name: &TemplateName) -> SourceLocation {
        SourceLocation {
            tier: self.tier,
            path: self.base.as_ref().map(|b| name.under(b)),
        }
    }

    fn base_dir(&self) -> Option<PathBuf> {
        self.base.clone()
    }

    fn catalogue(&self) -> Vec<TemplateName> {
        self.templates
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default()
    }
}

// ── Standard chain ────────────────────────────────────────────────────────────

/// Base directories of the three filesystem tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub binary_local: Option<PathBuf>,
    pub project_local: PathBuf,
    pub user_global: Option<PathBuf>,
}

impl SourcePaths {
    /// Default locations for a project rooted at `project_root`.
    ///
    /// `user_dir` replaces `<home>/.hexago/templates` when set.
    pub fn discover(project_root: &Path, user_dir: Option<PathBuf>) -> Self {
        let binary_local = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")));
        let user_global =
            user_dir.or_else(|| dirs::home_dir().map(|home| home.join(".hexago").join("templates")));

        Self {
            binary_local,
            project_local: project_root.join(".hexago").join("templates"),
            user_global,
        }
    }
}

/// All four tiers in priority order.
pub fn standard_chain(paths: &SourcePaths, fs: Arc<dyn Filesystem>) -> SourceChain {
    let mut sources: Vec<Box<dyn TemplateSource>> = Vec::with_capacity(4);

    if let Some(dir) = &paths.binary_local {
        sources.push(Box::new(DirectorySource::new(
            SourceTier::BinaryLocal,
            dir,
            Arc::clone(&fs),
        )));
    }
    sources.push(Box::new(DirectorySource::new(
        SourceTier::ProjectLocal,
        &paths.project_local,
        Arc::clone(&fs),
    )));
    if let Some(dir) = &paths.user_global {
        sources.push(Box::new(DirectorySource::new(
            SourceTier::UserGlobal,
            dir,
            Arc::clone(&fs),
        )));
    }
    sources.push(Box::new(EmbeddedSource::new()));

    SourceChain::new(sources)
}
