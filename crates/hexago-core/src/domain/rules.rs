//! Dependency-direction rules for each architectural layer.
//!
//! Rules only govern *internal* dependencies, i.e. import paths under the
//! project's own module. Everything else is third-party and always allowed.

use std::fmt;

/// A layer whose imports are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// `internal/core/domain`
    Domain,
    /// `internal/core/services` or `internal/core/usecases`
    BusinessLogic,
    /// `internal/adapters`
    Adapters,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Domain => "domain",
            Self::BusinessLogic => "business logic",
            Self::Adapters => "adapter",
        })
    }
}

/// Outcome of classifying one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    /// Reported as a warning; never fails validation.
    Advisory,
    /// Reported as an error.
    Forbidden,
}

/// A layer's allow rule, bound to the project's module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRule {
    layer: Layer,
    module: String,
}

impl LayerRule {
    pub fn new(layer: Layer, module: impl Into<String>) -> Self {
        Self {
            layer,
            module: module.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// The part of `dependency` below the module path, or `None` when the
    /// dependency belongs to another module.
    pub fn internal_path<'d>(&self, dependency: &'d str) -> Option<&'d str> {
        let rest = dependency.strip_prefix(self.module.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    /// Classify `dependency` as imported by `origin`, a project-relative
    /// file path such as `internal/adapters/primary/http/user.go`.
    pub fn classify(&self, origin: &str, dependency: &str) -> Verdict {
        let Some(internal) = self.internal_path(dependency) else {
            return Verdict::Allowed;
        };

        match self.layer {
            Layer::Domain => {
                if has_segment(internal, "adapters") || has_segment(internal, "infrastructure") {
                    Verdict::Forbidden
                } else {
                    Verdict::Allowed
                }
            }
            Layer::BusinessLogic => {
                if has_segment(internal, "adapters") {
                    Verdict::Forbidden
                } else {
                    Verdict::Allowed
                }
            }
            // Cross-direction imports stay advisory until same-type and
            // cross-type adapter imports can be told apart.
            Layer::Adapters => match (adapter_direction(origin), adapter_direction(internal)) {
                (Some(from), Some(to)) if from != to => Verdict::Advisory,
                _ => Verdict::Allowed,
            },
        }
    }
}

fn has_segment(path: &str, segment: &str) -> bool {
    path.split('/').any(|s| s == segment)
}

/// Segment right after `adapters`, e.g. `primary`.
fn adapter_direction(path: &str) -> Option<&str> {
    let mut segments = path.split('/');
    segments.find(|s| *s == "adapters")?;
    segments.next().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = "github.com/user/app";

    #[test]
    fn external_dependencies_are_always_allowed() {
        let rule = LayerRule::new(Layer::Domain, MODULE);
        assert_eq!(
            rule.classify(
                "internal/core/domain/user.go",
                "github.com/other/lib/adapters/x"
            ),
            Verdict::Allowed
        );
    }

    #[test]
    fn module_prefix_must_end_at_segment_boundary() {
        let rule = LayerRule::new(Layer::Domain, MODULE);
        assert_eq!(rule.internal_path("github.com/user/app2/internal/adapters"), None);
        assert_eq!(
            rule.internal_path("github.com/user/app/internal/adapters"),
            Some("internal/adapters")
        );
    }

    #[test]
    fn domain_rejects_adapters_and_infrastructure() {
        let rule = LayerRule::new(Layer::Domain, MODULE);
        let origin = "internal/core/domain/user.go";
        assert_eq!(
            rule.classify(
                origin,
                "github.com/user/app/internal/adapters/secondary/database"
            ),
            Verdict::Forbidden
        );
        assert_eq!(
            rule.classify(origin, "github.com/user/app/internal/infrastructure"),
            Verdict::Forbidden
        );
        assert_eq!(
            rule.classify(origin, "github.com/user/app/internal/core/domain/shared"),
            Verdict::Allowed
        );
    }

    #[test]
    fn business_logic_only_rejects_adapters() {
        let rule = LayerRule::new(Layer::BusinessLogic, MODULE);
        let origin = "internal/core/services/user.go";
        assert_eq!(
            rule.classify(origin, "github.com/user/app/internal/adapters/primary/http"),
            Verdict::Forbidden
        );
        assert_eq!(
            rule.classify(origin, "github.com/user/app/internal/infrastructure/db"),
            Verdict::Allowed
        );
    }

    #[test]
    fn segment_match_is_exact() {
        let rule = LayerRule::new(Layer::BusinessLogic, MODULE);
        assert_eq!(
            rule.classify(
                "internal/core/services/a.go",
                "github.com/user/app/internal/myadapters/x"
            ),
            Verdict::Allowed
        );
    }

    #[test]
    fn adapters_warn_on_cross_direction_imports_only() {
        let rule = LayerRule::new(Layer::Adapters, MODULE);
        let origin = "internal/adapters/primary/http/user_handler.go";
        assert_eq!(
            rule.classify(
                origin,
                "github.com/user/app/internal/adapters/secondary/database"
            ),
            Verdict::Advisory
        );
        assert_eq!(
            rule.classify(origin, "github.com/user/app/internal/adapters/primary/http/middleware"),
            Verdict::Allowed
        );
        assert_eq!(
            rule.classify(origin, "github.com/user/app/internal/core/services"),
            Verdict::Allowed
        );
    }
}
