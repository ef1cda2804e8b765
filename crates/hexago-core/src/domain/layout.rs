//! Project naming conventions: which directory names a generated project
//! uses for its adapters and its business logic.
//!
//! These are pure value types with `FromStr` parsers; reading them from
//! `.hexago.yaml` or detecting them on disk is an adapter concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── AdapterStyle ──────────────────────────────────────────────────────────────

/// Naming pair for inbound/outbound adapter directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdapterStyle {
    /// `internal/adapters/primary` and `internal/adapters/secondary`.
    #[default]
    PrimarySecondary,
    /// `internal/adapters/driver` and `internal/adapters/driven`.
    DriverDriven,
}

impl AdapterStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PrimarySecondary => "primary-secondary",
            Self::DriverDriven => "driver-driven",
        }
    }

    pub const fn inbound_dir(&self) -> &'static str {
        match self {
            Self::PrimarySecondary => "primary",
            Self::DriverDriven => "driver",
        }
    }

    pub const fn outbound_dir(&self) -> &'static str {
        match self {
            Self::PrimarySecondary => "secondary",
            Self::DriverDriven => "driven",
        }
    }
}

impl fmt::Display for AdapterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary-secondary" => Ok(Self::PrimarySecondary),
            "driver-driven" => Ok(Self::DriverDriven),
            other => Err(DomainError::UnknownAdapterStyle {
                value: other.to_owned(),
            }),
        }
    }
}

// ── CoreLogic ─────────────────────────────────────────────────────────────────

/// Directory name for the business-logic layer under `internal/core`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreLogic {
    #[default]
    Services,
    UseCases,
}

impl CoreLogic {
    pub const fn dir(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::UseCases => "usecases",
        }
    }
}

impl fmt::Display for CoreLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

impl FromStr for CoreLogic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "services" => Ok(Self::Services),
            "usecases" => Ok(Self::UseCases),
            other => Err(DomainError::UnknownCoreLogic {
                value: other.to_owned(),
            }),
        }
    }
}

// ── ProjectLayout ─────────────────────────────────────────────────────────────

/// Everything the architecture validator needs to know about a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    pub project_name: String,
    /// Go module path, e.g. `github.com/user/my-app`.
    pub module_name: String,
    pub adapter_style: AdapterStyle,
    pub core_logic: CoreLogic,
}

impl ProjectLayout {
    pub fn new(
        project_name: impl Into<String>,
        module_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let module_name = module_name.into();
        if module_name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "module_name",
            });
        }
        Ok(Self {
            project_name: project_name.into(),
            module_name,
            adapter_style: AdapterStyle::default(),
            core_logic: CoreLogic::default(),
        })
    }

    pub fn with_adapter_style(mut self, style: AdapterStyle) -> Self {
        self.adapter_style = style;
        self
    }

    pub fn with_core_logic(mut self, logic: CoreLogic) -> Self {
        self.core_logic = logic;
        self
    }

    pub const DOMAIN_DIR: &'static str = "internal/core/domain";
    pub const ADAPTERS_DIR: &'static str = "internal/adapters";
    pub const CONFIG_DIR: &'static str = "internal/config";

    pub fn core_logic_dir(&self) -> String {
        format!("internal/core/{}", self.core_logic.dir())
    }

    pub fn inbound_dir(&self) -> String {
        format!("{}/{}", Self::ADAPTERS_DIR, self.adapter_style.inbound_dir())
    }

    pub fn outbound_dir(&self) -> String {
        format!("{}/{}", Self::ADAPTERS_DIR, self.adapter_style.outbound_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_style_parses_both_pairs() {
        assert_eq!(
            "primary-secondary".parse::<AdapterStyle>().unwrap(),
            AdapterStyle::PrimarySecondary
        );
        assert_eq!(
            "Driver-Driven".parse::<AdapterStyle>().unwrap(),
            AdapterStyle::DriverDriven
        );
    }

    #[test]
    fn unknown_adapter_style_is_config_error() {
        let err = "ports-adapters".parse::<AdapterStyle>().unwrap_err();
        assert_eq!(
            err.category(),
            crate::domain::ErrorCategory::Configuration
        );
    }

    #[test]
    fn core_logic_rejects_unknown_values() {
        assert_eq!("usecases".parse::<CoreLogic>().unwrap(), CoreLogic::UseCases);
        assert!(matches!(
            "handlers".parse::<CoreLogic>(),
            Err(DomainError::UnknownCoreLogic { .. })
        ));
    }

    #[test]
    fn layout_directories_follow_convention() {
        let layout = ProjectLayout::new("app", "example.com/app")
            .unwrap()
            .with_adapter_style(AdapterStyle::DriverDriven)
            .with_core_logic(CoreLogic::UseCases);

        assert_eq!(layout.core_logic_dir(), "internal/core/usecases");
        assert_eq!(layout.inbound_dir(), "internal/adapters/driver");
        assert_eq!(layout.outbound_dir(), "internal/adapters/driven");
    }

    #[test]
    fn layout_requires_module_name() {
        assert!(matches!(
            ProjectLayout::new("app", "  "),
            Err(DomainError::MissingRequiredField { field: "module_name" })
        ));
    }
}
