//! Architecture Validator - checks a generated Go tree for dependency
//! direction violations.
//!
//! Checks always run in the same order and never abort each other:
//!
//! 1. structure      expected directories exist
//! 2. domain         `internal/core/domain` imports no adapters/infrastructure
//! 3. business logic `internal/core/<logic>` imports no adapters
//! 4. adapters       cross-direction imports are advisory
//! 5. naming         report the detected naming convention
//!
//! Findings are data in the returned [`ValidationReport`], never errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::{
    application::ports::Filesystem,
    domain::{Layer, LayerRule, ProjectLayout, ValidationReport, Verdict, case, scan_imports},
};

pub struct ArchitectureValidator {
    fs: Arc<dyn Filesystem>,
    root: PathBuf,
    layout: ProjectLayout,
}

impl ArchitectureValidator {
    pub fn new(fs: Arc<dyn Filesystem>, root: impl Into<PathBuf>, layout: ProjectLayout) -> Self {
        Self {
            fs,
            root: root.into(),
            layout,
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Run every check and collect the findings.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.check_structure(&mut report);
        self.check_domain(&mut report);
        self.check_business_logic(&mut report);
        self.check_adapters(&mut report);
        self.check_naming(&mut report);

        debug!(
            successes = report.successes.len(),
            warnings = report.warnings.len(),
            errors = report.errors.len(),
            "validation finished"
        );
        report
    }

    // ── Checks ────────────────────────────────────────────────────────────────

    fn check_structure(&self, report: &mut ValidationReport) {
        let expected = [
            (ProjectLayout::DOMAIN_DIR.to_owned(), "Domain directory"),
            (self.layout.core_logic_dir(), "Core logic directory"),
            (self.layout.inbound_dir(), "Inbound adapters directory"),
            (self.layout.outbound_dir(), "Outbound adapters directory"),
            (ProjectLayout::CONFIG_DIR.to_owned(), "Config directory"),
        ];

        for (dir, desc) in expected {
            if self.fs.is_dir(&self.root.join(&dir)) {
                report.success(format!("{desc} exists"));
            } else {
                report.warning(format!("{desc} not found: {dir}"));
            }
        }
    }

    fn check_domain(&self, report: &mut ValidationReport) {
        let Some(violations) = self.scan_layer(Layer::Domain, ProjectLayout::DOMAIN_DIR, report)
        else {
            return;
        };

        if violations.is_empty() {
            report.success("Core domain has no external dependencies");
        }
        for (file, dep) in violations {
            report.error(format!("Domain imports external package: {dep} in {file}"));
        }
    }

    fn check_business_logic(&self, report: &mut ValidationReport) {
        let dir = self.layout.core_logic_dir();
        let Some(violations) = self.scan_layer(Layer::BusinessLogic, &dir, report) else {
            return;
        };

        let label = case::title(self.layout.core_logic.dir());
        if violations.is_empty() {
            report.success(format!("{label} only depend on domain and ports"));
        }
        for (file, dep) in violations {
            report.error(format!("{label} imports adapter: {dep} in {file}"));
        }
    }

    fn check_adapters(&self, report: &mut ValidationReport) {
        let Some(advisories) = self.scan_layer(Layer::Adapters, ProjectLayout::ADAPTERS_DIR, report)
        else {
            return;
        };

        if advisories.is_empty() {
            report.success("Adapters follow dependency rules");
        }
        for (file, dep) in advisories {
            report.warning(format!("Adapter cross-import: {dep} in {file}"));
        }
    }

    fn check_naming(&self, report: &mut ValidationReport) {
        let style = self.layout.adapter_style;
        if self.fs.is_dir(&self.root.join(self.layout.inbound_dir())) {
            report.success(format!("Using {} for inbound adapters", style.inbound_dir()));
        }
        if self.fs.is_dir(&self.root.join(self.layout.outbound_dir())) {
            report.success(format!("Using {} for outbound adapters", style.outbound_dir()));
        }
        if self.fs.is_dir(&self.root.join(self.layout.core_logic_dir())) {
            report.success(format!(
                "Using {} for business logic",
                self.layout.core_logic.dir()
            ));
        }
    }

    // ── Scanning ──────────────────────────────────────────────────────────────

    /// Every non-`Allowed` dependency under `dir` as `(file, dependency)`.
    ///
    /// `None` when the layer root is missing or could not be walked; a walk
    /// failure is recorded as a warning.
    fn scan_layer(
        &self,
        layer: Layer,
        dir: &str,
        report: &mut ValidationReport,
    ) -> Option<Vec<(String, String)>> {
        let layer_root = self.root.join(dir);
        if !self.fs.is_dir(&layer_root) {
            trace!(%layer, "layer root missing, skipping");
            return None;
        }

        let files = match self.fs.walk_files(&layer_root) {
            Ok(files) => files,
            Err(e) => {
                report.warning(format!("Could not check {layer} dependencies: {e}"));
                return None;
            }
        };

        let rule = LayerRule::new(layer, self.layout.module_name.as_str());
        let mut findings = Vec::new();

        for path in files.iter().filter(|p| is_go_source(p)) {
            let rel = self.relative(path);
            let Some(imports) = self.imports_of(path, &rel) else {
                continue;
            };
            for dep in imports {
                if rule.classify(&rel, &dep) != Verdict::Allowed {
                    findings.push((rel.clone(), dep));
                }
            }
        }

        Some(findings)
    }

    /// Imports of one file; unreadable or unscannable files are skipped.
    fn imports_of(&self, path: &Path, rel: &str) -> Option<Vec<String>> {
        let bytes = match self.fs.read_file(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(file = rel, error = %e, "skipping unreadable file");
                return None;
            }
        };
        match scan_imports(&String::from_utf8_lossy(&bytes)) {
            Ok(imports) => Some(imports),
            Err(e) => {
                debug!(file = rel, error = %e, "skipping file with unparsable header");
                None
            }
        }
    }

    /// Project-relative path with `/` separators.
    fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}
