//! Typed data contexts for template rendering.
//!
//! Each template group consumes exactly one context type. The mapping is a
//! fixed table ([`ContextKind::for_template`]) so a template can never be
//! rendered against data it was not written for.
//!
//! | Group              | Context            |
//! |--------------------|--------------------|
//! | `project/`, `misc/`| [`ProjectContext`] |
//! | `service/`         | [`ServiceContext`] |
//! | `domain/`          | [`DomainContext`]  |
//! | `adapter/`         | [`AdapterContext`] |

use std::fmt;

use serde::Serialize;

use super::{
    case, component::AdapterDirection, layout::ProjectLayout, template::TemplateName,
};

/// Which context type a template expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Project,
    Service,
    Domain,
    Adapter,
}

impl ContextKind {
    /// Look up the expected context by template group. Groups outside the
    /// table accept any context.
    pub fn for_template(name: &TemplateName) -> Option<Self> {
        match name.group() {
            "project" | "misc" => Some(Self::Project),
            "service" => Some(Self::Service),
            "domain" => Some(Self::Domain),
            "adapter" => Some(Self::Adapter),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Service => "service",
            Self::Domain => "domain",
            Self::Adapter => "adapter",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data a template can be rendered against.
pub trait TemplateData: Serialize {
    const KIND: ContextKind;
}

// ── Project ───────────────────────────────────────────────────────────────────

/// Project-wide values used by `project/*` and `misc/*` templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectContext {
    pub project_name: String,
    pub module_name: String,
    pub adapter_inbound: String,
    pub adapter_outbound: String,
    pub core_logic: String,
    pub go_version: String,
    pub author: String,
    pub year: i32,
}

impl ProjectContext {
    pub const DEFAULT_GO_VERSION: &'static str = "1.21";

    pub fn from_layout(layout: &ProjectLayout, year: i32) -> Self {
        Self {
            project_name: layout.project_name.clone(),
            module_name: layout.module_name.clone(),
            adapter_inbound: layout.adapter_style.inbound_dir().to_owned(),
            adapter_outbound: layout.adapter_style.outbound_dir().to_owned(),
            core_logic: layout.core_logic.dir().to_owned(),
            go_version: Self::DEFAULT_GO_VERSION.to_owned(),
            author: String::new(),
            year,
        }
    }
}

impl TemplateData for ProjectContext {
    const KIND: ContextKind = ContextKind::Project;
}

// ── Service ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceContext {
    pub module_name: String,
    pub core_logic: String,
    pub service_name: String,
    pub description: String,
}

impl ServiceContext {
    pub fn new(layout: &ProjectLayout, service_name: &str, description: Option<&str>) -> Self {
        let description = match description {
            Some(d) if !d.trim().is_empty() => d.to_owned(),
            _ => format!("handles {service_name} operations"),
        };
        Self {
            module_name: layout.module_name.clone(),
            core_logic: layout.core_logic.dir().to_owned(),
            service_name: case::title(service_name),
            description,
        }
    }
}

impl TemplateData for ServiceContext {
    const KIND: ContextKind = ContextKind::Service;
}

// ── Domain ────────────────────────────────────────────────────────────────────

/// One field of a generated entity or value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub type_name: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainContext {
    pub module_name: String,
    pub name: String,
    pub fields: Vec<FieldSpec>,
    /// Some field refers to the `time` package.
    pub needs_time: bool,
}

impl DomainContext {
    pub fn new(layout: &ProjectLayout, name: &str, fields: Vec<FieldSpec>) -> Self {
        let needs_time = fields.iter().any(|f| f.type_name.contains("time."));
        Self {
            module_name: layout.module_name.clone(),
            name: case::title(name),
            fields,
            needs_time,
        }
    }
}

impl TemplateData for DomainContext {
    const KIND: ContextKind = ContextKind::Domain;
}

// ── Adapter ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterContext {
    pub module_name: String,
    pub core_logic: String,
    /// Adapter direction directory, e.g. `primary` or `driven`.
    pub direction: String,
    /// Technology subdirectory, e.g. `http` or `database`.
    pub adapter_type: String,
    pub adapter_name: String,
}

impl AdapterContext {
    pub fn inbound(layout: &ProjectLayout, adapter_type: &str, adapter_name: &str) -> Self {
        Self::with_direction(layout, layout.adapter_style.inbound_dir(), adapter_type, adapter_name)
    }

    pub fn outbound(layout: &ProjectLayout, adapter_type: &str, adapter_name: &str) -> Self {
        Self::with_direction(layout, layout.adapter_style.outbound_dir(), adapter_type, adapter_name)
    }

    pub fn for_direction(
        layout: &ProjectLayout,
        direction: AdapterDirection,
        adapter_type: &str,
        adapter_name: &str,
    ) -> Self {
        match direction {
            AdapterDirection::Inbound => Self::inbound(layout, adapter_type, adapter_name),
            AdapterDirection::Outbound => Self::outbound(layout, adapter_type, adapter_name),
        }
    }

    fn with_direction(
        layout: &ProjectLayout,
        direction: &str,
        adapter_type: &str,
        adapter_name: &str,
    ) -> Self {
        Self {
            module_name: layout.module_name.clone(),
            core_logic: layout.core_logic.dir().to_owned(),
            direction: direction.to_owned(),
            adapter_type: adapter_type.to_owned(),
            adapter_name: case::title(adapter_name),
        }
    }
}

impl TemplateData for AdapterContext {
    const KIND: ContextKind = ContextKind::Adapter;
}

// ── Erased ────────────────────────────────────────────────────────────────────

/// Any of the contexts above, for callers that hold a renderer as a trait
/// object and so cannot use the generic [`TemplateData`] path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderContext {
    Project(ProjectContext),
    Service(ServiceContext),
    Domain(DomainContext),
    Adapter(AdapterContext),
}

impl RenderContext {
    pub const fn kind(&self) -> ContextKind {
        match self {
            Self::Project(_) => ContextKind::Project,
            Self::Service(_) => ContextKind::Service,
            Self::Domain(_) => ContextKind::Domain,
            Self::Adapter(_) => ContextKind::Adapter,
        }
    }
}

macro_rules! render_context_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for RenderContext {
            fn from(ctx: $ty) -> Self {
                Self::$variant(ctx)
            }
        })*
    };
}

render_context_from! {
    ProjectContext => Project,
    ServiceContext => Service,
    DomainContext => Domain,
    AdapterContext => Adapter,
}
