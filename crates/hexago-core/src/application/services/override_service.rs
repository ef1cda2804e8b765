//! Override Service - export, reset and syntax-check template overrides.
//!
//! An override is a plain file at a writable tier's base directory whose
//! relative path equals the template name. Export copies the currently
//! winning bytes there verbatim; reset deletes it again.
//!
//! None of these operations touch a loader's parse cache.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateSyntaxChecker},
        services::SourceChain,
    },
    domain::{OverrideTier, SourceLocation, TemplateName},
    error::{HexagoError, HexagoResult},
};

/// Result of a single export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exported {
    pub name: TemplateName,
    /// The source whose bytes were copied.
    pub from: SourceLocation,
    pub to: PathBuf,
}

/// Outcome of exporting every known template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub exported: Vec<Exported>,
    /// Names that already had an override at the tier.
    pub skipped: Vec<TemplateName>,
    pub failed: Vec<(TemplateName, String)>,
}

impl ExportSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Service for managing template overrides.
pub struct OverrideService {
    chain: Arc<SourceChain>,
    fs: Arc<dyn Filesystem>,
    checker: Arc<dyn TemplateSyntaxChecker>,
}

impl OverrideService {
    pub fn new(
        chain: Arc<SourceChain>,
        fs: Arc<dyn Filesystem>,
        checker: Arc<dyn TemplateSyntaxChecker>,
    ) -> Self {
        Self { chain, fs, checker }
    }

    /// Destination of `name` at `tier`.
    pub fn override_path(&self, name: &TemplateName, tier: OverrideTier) -> HexagoResult<PathBuf> {
        let base = self
            .chain
            .source(tier.source_tier())
            .and_then(|s| s.base_dir())
            .ok_or_else(|| HexagoError::Configuration {
                message: format!("no {tier} template directory is configured"),
            })?;
        Ok(name.under(&base))
    }

    /// Copy the winning content of `name` to `tier`. Overwrites silently.
    #[instrument(skip(self), fields(template = %name, tier = %tier))]
    pub fn export(&self, name: &TemplateName, tier: OverrideTier) -> HexagoResult<Exported> {
        let resolved = self.chain.resolve(name)?;
        let dest = self.override_path(name, tier)?;

        if let Some(parent) = dest.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write_file(&dest, &resolved.content)?;
        info!(from = %resolved.location, to = %dest.display(), "exported template");

        Ok(Exported {
            name: name.clone(),
            from: resolved.location,
            to: dest,
        })
    }

    /// Export every listed template. Existing overrides at `tier` are kept
    /// unless `force` is set; per-template failures are collected.
    #[instrument(skip(self), fields(tier = %tier))]
    pub fn export_all(&self, tier: OverrideTier, force: bool) -> HexagoResult<ExportSummary> {
        let mut summary = ExportSummary::default();

        for name in self.chain.list() {
            let dest = self.override_path(&name, tier)?;
            if !force && self.fs.exists(&dest) {
                debug!(template = %name, "override exists, skipping");
                summary.skipped.push(name);
                continue;
            }
            match self.export(&name, tier) {
                Ok(exported) => summary.exported.push(exported),
                Err(e) => {
                    warn!(template = %name, error = %e, "export failed");
                    summary.failed.push((name, e.to_string()));
                }
            }
        }

        Ok(summary)
    }

    /// Delete the override of `name` at `tier`.
    #[instrument(skip(self), fields(template = %name, tier = %tier))]
    pub fn reset(&self, name: &TemplateName, tier: OverrideTier) -> HexagoResult<PathBuf> {
        let path = self.override_path(name, tier)?;
        if !self.fs.is_file(&path) {
            return Err(ApplicationError::OverrideNotFound {
                name: name.to_string(),
                path,
            }
            .into());
        }
        self.fs.remove_file(&path)?;
        info!(path = %path.display(), "removed override");
        Ok(path)
    }

    /// Parse the file at `path` with the rendering environment.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn validate_syntax(&self, path: &Path) -> HexagoResult<()> {
        let display = path.display().to_string();
        let bytes = self.fs.read_file(path)?;
        let content = String::from_utf8(bytes).map_err(|e| ApplicationError::TemplateSyntax {
            name: display.clone(),
            source_label: "file".into(),
            message: format!("syntax error: not valid UTF-8 ({e})"),
        })?;
        self.checker.check(&display, "file", &content)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::{
        MockFilesystem, MockTemplateSource, MockTemplateSyntaxChecker, TemplateSource,
    };
    use crate::domain::SourceTier;

    const BODY: &str = "package {{ service_name }}\n";

    fn name(s: &str) -> TemplateName {
        TemplateName::new(s).unwrap()
    }

    fn embedded() -> Box<dyn TemplateSource> {
        let mut mock = MockTemplateSource::new();
        mock.expect_tier().return_const(SourceTier::Embedded);
        mock.expect_exists()
            .returning(|n| n.as_str() != "service/missing.tmpl");
        mock.expect_read()
            .returning(|_| Ok(BODY.as_bytes().to_vec()));
        mock.expect_location().returning(|_| SourceLocation {
            tier: SourceTier::Embedded,
            path: None,
        });
        mock.expect_catalogue()
            .returning(|| vec![name("a/one.tmpl"), name("b/two.tmpl")]);
        mock.expect_base_dir().returning(|| None);
        Box::new(mock)
    }

    fn project_local() -> Box<dyn TemplateSource> {
        let mut mock = MockTemplateSource::new();
        mock.expect_tier().return_const(SourceTier::ProjectLocal);
        mock.expect_exists().returning(|_| false);
        mock.expect_base_dir()
            .returning(|| Some(PathBuf::from("/proj/.hexago/templates")));
        Box::new(mock)
    }

    fn chain() -> Arc<SourceChain> {
        Arc::new(SourceChain::new(vec![project_local(), embedded()]))
    }

    fn no_checker() -> Arc<dyn TemplateSyntaxChecker> {
        Arc::new(MockTemplateSyntaxChecker::new())
    }

    /// A mock filesystem backed by a shared map of written files.
    fn recording_fs(files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let w = Arc::clone(&files);
        fs.expect_write_file().returning(move |p, c| {
            w.lock().unwrap().insert(p.to_path_buf(), c.to_vec());
            Ok(())
        });
        let e = Arc::clone(&files);
        fs.expect_exists()
            .returning(move |p| e.lock().unwrap().contains_key(p));
        fs
    }

    #[test]
    fn export_writes_winning_bytes_under_tier_base() {
        let files = Arc::new(Mutex::new(BTreeMap::new()));
        let svc = OverrideService::new(chain(), Arc::new(recording_fs(files.clone())), no_checker());

        let exported = svc
            .export(&name("service/service.go.tmpl"), OverrideTier::ProjectLocal)
            .unwrap();

        let dest = PathBuf::from("/proj/.hexago/templates/service/service.go.tmpl");
        assert_eq!(exported.to, dest);
        assert_eq!(exported.from.tier, SourceTier::Embedded);
        assert_eq!(files.lock().unwrap()[&dest], BODY.as_bytes());
    }

    #[test]
    fn export_of_unknown_template_is_not_found() {
        let svc = OverrideService::new(chain(), Arc::new(MockFilesystem::new()), no_checker());

        let err = svc
            .export(&name("service/missing.tmpl"), OverrideTier::ProjectLocal)
            .unwrap_err();
        assert!(matches!(
            err,
            HexagoError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn export_to_unconfigured_tier_is_configuration_error() {
        let svc = OverrideService::new(chain(), Arc::new(MockFilesystem::new()), no_checker());

        let err = svc
            .export(&name("a/one.tmpl"), OverrideTier::UserGlobal)
            .unwrap_err();
        assert!(matches!(err, HexagoError::Configuration { .. }));
    }

    #[test]
    fn export_all_skips_existing_unless_forced() {
        let files = Arc::new(Mutex::new(BTreeMap::new()));
        files.lock().unwrap().insert(
            PathBuf::from("/proj/.hexago/templates/a/one.tmpl"),
            b"mine".to_vec(),
        );
        let svc = OverrideService::new(chain(), Arc::new(recording_fs(files.clone())), no_checker());

        let summary = svc.export_all(OverrideTier::ProjectLocal, false).unwrap();
        assert_eq!(summary.skipped, vec![name("a/one.tmpl")]);
        assert_eq!(summary.exported.len(), 1);
        assert!(summary.is_clean());

        let summary = svc.export_all(OverrideTier::ProjectLocal, true).unwrap();
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.exported.len(), 2);
    }

    #[test]
    fn reset_missing_override_names_the_path() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().returning(|_| false);
        let svc = OverrideService::new(chain(), Arc::new(fs), no_checker());

        let err = svc
            .reset(&name("a/one.tmpl"), OverrideTier::ProjectLocal)
            .unwrap_err();
        match err {
            HexagoError::Application(ApplicationError::OverrideNotFound { path, .. }) => {
                assert_eq!(path, PathBuf::from("/proj/.hexago/templates/a/one.tmpl"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reset_removes_existing_override() {
        let target = PathBuf::from("/proj/.hexago/templates/a/one.tmpl");
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().returning(|_| true);
        let expected = target.clone();
        fs.expect_remove_file()
            .withf(move |p| p == expected)
            .times(1)
            .returning(|_| Ok(()));
        let svc = OverrideService::new(chain(), Arc::new(fs), no_checker());

        let removed = svc
            .reset(&name("a/one.tmpl"), OverrideTier::ProjectLocal)
            .unwrap();
        assert_eq!(removed, target);
    }

    #[test]
    fn validate_syntax_delegates_to_checker() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .returning(|_| Ok(b"{% if x %}".to_vec()));
        let mut checker = MockTemplateSyntaxChecker::new();
        checker
            .expect_check()
            .withf(|_, label, content| label == "file" && content == "{% if x %}")
            .returning(|name, label, _| {
                Err(ApplicationError::TemplateSyntax {
                    name: name.into(),
                    source_label: label.into(),
                    message: "syntax error: unexpected end of input".into(),
                }
                .into())
            });
        let svc = OverrideService::new(chain(), Arc::new(fs), Arc::new(checker));

        let err = svc.validate_syntax(Path::new("/tmp/broken.tmpl")).unwrap_err();
        assert!(err.to_string().contains("syntax"));
    }
}
