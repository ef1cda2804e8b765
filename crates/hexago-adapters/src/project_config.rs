//! Project detection: reads `.hexago.yaml`, falling back to `go.mod` and
//! directory heuristics for projects created without one.
//!
//! ```yaml
//! project:
//!   name: shop
//!   module: example.com/shop
//!   go_version: "1.22"
//! structure:
//!   adapter_style: primary-secondary   # or driver-driven
//!   core_logic: services               # or usecases
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use hexago_core::{
    application::ports::Filesystem,
    domain::{AdapterStyle, CoreLogic, DomainError, ProjectLayout},
    error::{HexagoError, HexagoResult},
};

pub const CONFIG_FILE: &str = ".hexago.yaml";

// ── File format ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct HexagoFile {
    project: ProjectSection,
    #[serde(default)]
    structure: StructureSection,
}

#[derive(Debug, Deserialize)]
struct ProjectSection {
    #[serde(default)]
    name: Option<String>,
    module: String,
    #[serde(default)]
    go_version: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StructureSection {
    #[serde(default)]
    adapter_style: Option<String>,
    #[serde(default)]
    core_logic: Option<String>,
}

// ── Detection ─────────────────────────────────────────────────────────────────

/// How a project's layout was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFrom {
    ConfigFile,
    GoMod,
}

/// A detected project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedProject {
    pub root: PathBuf,
    pub layout: ProjectLayout,
    pub go_version: Option<String>,
    pub author: Option<String>,
    pub detected_from: DetectedFrom,
}

pub struct ProjectDetector {
    fs: Arc<dyn Filesystem>,
    root: PathBuf,
}

impl ProjectDetector {
    pub fn new(fs: Arc<dyn Filesystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// Detect the project at the root.
    ///
    /// The project name is `project.name` from the config file when set,
    /// otherwise the root directory's name.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn detect(&self) -> HexagoResult<DetectedProject> {
        let config_path = self.root.join(CONFIG_FILE);
        if self.fs.is_file(&config_path) {
            debug!("reading {CONFIG_FILE}");
            return self.from_config_file(&config_path);
        }
        debug!("no {CONFIG_FILE}, falling back to go.mod");
        self.from_go_mod()
    }

    fn project_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_owned())
    }

    fn from_config_file(&self, path: &Path) -> HexagoResult<DetectedProject> {
        let bytes = self.fs.read_file(path)?;
        let file: HexagoFile =
            serde_yaml::from_slice(&bytes).map_err(|e| HexagoError::Configuration {
                message: format!("parse {CONFIG_FILE}: {e}"),
            })?;

        let name = non_empty(file.project.name).unwrap_or_else(|| self.project_name());
        let mut layout = ProjectLayout::new(name, file.project.module)?;
        if let Some(style) = non_empty(file.structure.adapter_style) {
            layout = layout.with_adapter_style(style.parse()?);
        }
        if let Some(logic) = non_empty(file.structure.core_logic) {
            layout = layout.with_core_logic(logic.parse()?);
        }

        Ok(DetectedProject {
            root: self.root.clone(),
            layout,
            go_version: non_empty(file.project.go_version),
            author: non_empty(file.project.author),
            detected_from: DetectedFrom::ConfigFile,
        })
    }

    fn from_go_mod(&self) -> HexagoResult<DetectedProject> {
        let go_mod = self.root.join("go.mod");
        if !self.fs.is_file(&go_mod) {
            return Err(self.not_detected("not a Go project (go.mod not found)"));
        }
        if !self.fs.is_dir(&self.root.join("internal").join("core")) {
            return Err(
                self.not_detected("not a hexagonal architecture project (internal/core not found)")
            );
        }

        let content = String::from_utf8_lossy(&self.fs.read_file(&go_mod)?).into_owned();
        let module = module_name(&content)
            .ok_or_else(|| self.not_detected("module name not found in go.mod"))?;

        let layout = ProjectLayout::new(self.project_name(), module)?
            .with_adapter_style(self.detect_adapter_style())
            .with_core_logic(self.detect_core_logic());

        Ok(DetectedProject {
            root: self.root.clone(),
            layout,
            go_version: go_directive(&content),
            author: None,
            detected_from: DetectedFrom::GoMod,
        })
    }

    fn detect_adapter_style(&self) -> AdapterStyle {
        let adapters = self.root.join("internal").join("adapters");
        if self.fs.is_dir(&adapters.join("primary")) {
            AdapterStyle::PrimarySecondary
        } else if self.fs.is_dir(&adapters.join("driver")) {
            AdapterStyle::DriverDriven
        } else {
            AdapterStyle::default()
        }
    }

    fn detect_core_logic(&self) -> CoreLogic {
        let core = self.root.join("internal").join("core");
        if self.fs.is_dir(&core.join("services")) {
            CoreLogic::Services
        } else if self.fs.is_dir(&core.join("usecases")) {
            CoreLogic::UseCases
        } else {
            CoreLogic::default()
        }
    }

    fn not_detected(&self, reason: &str) -> HexagoError {
        DomainError::ProjectNotDetected {
            path: self.root.clone(),
            reason: reason.to_owned(),
        }
        .into()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Value of the `module` directive.
fn module_name(go_mod: &str) -> Option<String> {
    directive(go_mod, "module").map(|m| m.trim_matches('"').to_owned())
}

/// Value of the `go` directive.
fn go_directive(go_mod: &str) -> Option<String> {
    directive(go_mod, "go").map(str::to_owned)
}

fn directive<'a>(go_mod: &'a str, keyword: &str) -> Option<&'a str> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix(keyword)?;
        if !rest.starts_with([' ', '\t']) {
            return None;
        }
        Some(rest.trim()).filter(|v| !v.is_empty())
    })
}
