//! Names and field lists for generated Go components.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{case, context::FieldSpec, error::DomainError, layout::AdapterStyle};

/// A service, entity, value object or adapter name.
///
/// Must be a Go identifier. Stored in exported (PascalCase) form, so
/// `createOrder` and `CreateOrder` name the same component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentName(String);

impl ComponentName {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let name = raw.trim();
        check_identifier(name).map_err(|reason| DomainError::InvalidComponentName {
            name: raw.to_owned(),
            reason: reason.to_owned(),
        })?;
        Ok(Self(case::title(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Go file name without extension: `CreateOrder` → `create_order`.
    pub fn file_stem(&self) -> String {
        case::snake(&self.0)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn check_identifier(name: &str) -> Result<(), &'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("name cannot be empty"),
        Some(c) if !c.is_ascii_alphabetic() => return Err("must start with a letter"),
        Some(_) => {}
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Err("only letters, digits and '_' are allowed");
    }
    Ok(())
}

// ── Adapter direction ─────────────────────────────────────────────────────────

/// Which side of the hexagon an adapter sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterDirection {
    /// `primary` / `driver`: receives requests.
    Inbound,
    /// `secondary` / `driven`: calls out to infrastructure.
    Outbound,
}

impl AdapterDirection {
    /// Adapter technologies with an embedded template.
    pub const fn adapter_types(self) -> &'static [&'static str] {
        match self {
            Self::Inbound => &["http"],
            Self::Outbound => &["database"],
        }
    }

    /// The directory name this direction uses under `style`.
    pub const fn dir(self, style: AdapterStyle) -> &'static str {
        match self {
            Self::Inbound => style.inbound_dir(),
            Self::Outbound => style.outbound_dir(),
        }
    }
}

impl FromStr for AdapterDirection {
    type Err = DomainError;

    /// Either naming convention is accepted regardless of the project's.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" | "driver" | "inbound" => Ok(Self::Inbound),
            "secondary" | "driven" | "outbound" => Ok(Self::Outbound),
            other => Err(DomainError::UnknownAdapterDirection {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AdapterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        })
    }
}

// ── Fields ────────────────────────────────────────────────────────────────────

/// Parse `name:type,name:type`. Empty input means no fields.
pub fn parse_fields(input: &str) -> Result<Vec<FieldSpec>, DomainError> {
    let mut fields = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let invalid = |reason: &str| DomainError::InvalidFieldSpec {
            entry: part.to_owned(),
            reason: reason.to_owned(),
        };

        let (name, type_name) = part.split_once(':').ok_or_else(|| invalid("expected name:type"))?;
        let (name, type_name) = (name.trim(), type_name.trim());
        check_identifier(name).map_err(invalid)?;
        if type_name.is_empty() || type_name.contains(char::is_whitespace) {
            return Err(invalid("type must be a single Go type expression"));
        }
        fields.push(FieldSpec::new(name, type_name));
    }
    Ok(fields)
}
