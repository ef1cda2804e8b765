//! Command handlers, one module per subcommand.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use hexago_adapters::{LocalFilesystem, SourcePaths, TemplateLoader, standard_chain};
use hexago_core::{
    application::{OverrideService, SourceChain, ports::Filesystem},
    domain::OverrideTier,
};

use crate::config::AppConfig;

pub mod add;
pub mod completions;
pub mod config;
pub mod templates;
pub mod validate;

/// Filesystem, source chain and loader wired for one project root.
pub(crate) struct TemplateWorkspace {
    pub(crate) root: PathBuf,
    pub(crate) fs: Arc<dyn Filesystem>,
    pub(crate) chain: Arc<SourceChain>,
    pub(crate) loader: Arc<TemplateLoader>,
    pub(crate) overrides: OverrideService,
}

impl TemplateWorkspace {
    pub(crate) fn new(root: PathBuf, config: &AppConfig) -> Self {
        let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        let paths = SourcePaths::discover(&root, config.templates.user_dir.clone());
        debug!(?paths, "template source directories");

        let chain = Arc::new(standard_chain(&paths, Arc::clone(&fs)));
        let loader = Arc::new(TemplateLoader::new(Arc::clone(&chain)));
        let overrides = OverrideService::new(Arc::clone(&chain), Arc::clone(&fs), loader.clone());

        Self {
            root,
            fs,
            chain,
            loader,
            overrides,
        }
    }

    pub(crate) fn tier_base(&self, tier: OverrideTier) -> Option<PathBuf> {
        self.chain.source(tier.source_tier()).and_then(|s| s.base_dir())
    }
}
