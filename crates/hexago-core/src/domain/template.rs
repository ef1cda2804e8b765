//! Template identity and the tiers that can supply a template.
//!
//! A [`TemplateName`] is the same across every tier: it is the relative path
//! under each tier's base directory and the key of the loader's parse cache.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A slash-separated, relative template identifier such as
/// `service/service.go.tmpl`.
///
/// Invariant: never empty, never absolute, no backslashes, and no `.`, `..`
/// or empty segments. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    /// Fallible constructor.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidTemplateName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.starts_with('/') {
            return Err(invalid("absolute names are not allowed"));
        }
        if name.contains('\\') {
            return Err(invalid("use '/' as the separator"));
        }
        if name
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid("empty, '.' and '..' segments are not allowed"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First path segment, e.g. `service` for `service/service.go.tmpl`.
    pub fn group(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Resolve this name beneath `base`, one path component per segment.
    pub fn under(&self, base: &Path) -> PathBuf {
        self.0.split('/').fold(base.to_path_buf(), |acc, s| acc.join(s))
    }
}

impl FromStr for TemplateName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Tiers ─────────────────────────────────────────────────────────────────────

/// One of the four template providers, in fixed priority order.
///
/// The derived `Ord` follows declaration order, which is the resolution
/// order: lower wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTier {
    /// `templates/` next to the running executable.
    BinaryLocal,
    /// `.hexago/templates/` under the project root.
    ProjectLocal,
    /// `.hexago/templates/` under the user's home directory.
    UserGlobal,
    /// Bundle compiled into the binary. Always present, always last.
    Embedded,
}

impl SourceTier {
    /// Every tier in resolution order.
    pub const ALL: [SourceTier; 4] = [
        Self::BinaryLocal,
        Self::ProjectLocal,
        Self::UserGlobal,
        Self::Embedded,
    ];

    pub const fn priority(self) -> u8 {
        match self {
            Self::BinaryLocal => 1,
            Self::ProjectLocal => 2,
            Self::UserGlobal => 3,
            Self::Embedded => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BinaryLocal => "binary-local",
            Self::ProjectLocal => "project-local",
            Self::UserGlobal => "user-global",
            Self::Embedded => "embedded",
        }
    }
}

impl fmt::Display for SourceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The writable tiers an override can be exported to or reset from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideTier {
    ProjectLocal,
    UserGlobal,
}

impl OverrideTier {
    /// Maps the CLI's `--global` flag to a tier.
    pub const fn from_global(global: bool) -> Self {
        if global {
            Self::UserGlobal
        } else {
            Self::ProjectLocal
        }
    }

    pub const fn source_tier(self) -> SourceTier {
        match self {
            Self::ProjectLocal => SourceTier::ProjectLocal,
            Self::UserGlobal => SourceTier::UserGlobal,
        }
    }
}

impl fmt::Display for OverrideTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_tier().label())
    }
}

/// Where a resolved template came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub tier: SourceTier,
    /// Concrete file for filesystem tiers; `None` for the embedded bundle.
    pub path: Option<PathBuf>,
}

impl SourceLocation {
    pub fn is_override(&self) -> bool {
        self.tier != SourceTier::Embedded
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({})", self.tier, path.display()),
            None => write!(f, "{} (embedded)", self.tier),
        }
    }
}
