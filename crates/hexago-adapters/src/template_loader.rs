//! minijinja-backed template loader.
//!
//! Resolves template text through a [`SourceChain`], parses it once with the
//! helper environment and renders it against typed data.
//!
//! # Helper environment
//!
//! | Helper  | Effect                                  |
//! |---------|-----------------------------------------|
//! | `upper` | `order` → `ORDER`                       |
//! | `lower` | `Order` → `order`                       |
//! | `title` | `createOrder` → `CreateOrder`           |
//! | `snake` | `CreateOrder` → `create_order`          |
//!
//! Each helper is registered both as a filter (`{{ name | snake }}`) and as a
//! function (`{{ snake(name) }}`). Undefined variables are errors.
//!
//! # Cache
//!
//! Parsed templates are cached by name for the lifetime of the loader. The
//! cache does not remember which tier supplied a template: an override
//! exported after a name was first rendered is only observed by a fresh
//! loader or after [`TemplateLoader::invalidate_all`].

use std::sync::{Arc, Mutex};

use minijinja::{Environment, UndefinedBehavior, Value};
use tracing::{debug, instrument, trace};

use hexago_core::{
    application::{
        ApplicationError, SourceChain,
        ports::{TemplateRenderer, TemplateSyntaxChecker},
    },
    domain::{ContextKind, RenderContext, SourceLocation, TemplateData, TemplateName, case},
    error::{HexagoError, HexagoResult},
};

/// Build an environment with the helper set and strict undefined handling.
///
/// Rendering and syntax checking both start from here so they agree on
/// what parses.
pub fn build_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    env.add_filter("upper", case::upper);
    env.add_filter("lower", case::lower);
    env.add_filter("title", case::title);
    env.add_filter("snake", case::snake);

    env.add_function("upper", case::upper);
    env.add_function("lower", case::lower);
    env.add_function("title", case::title);
    env.add_function("snake", case::snake);

    env
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Resolves, parses, caches and renders templates.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use hexago_adapters::{LocalFilesystem, SourcePaths, TemplateLoader, standard_chain};
/// use hexago_core::domain::{ProjectContext, ProjectLayout, TemplateName};
///
/// let paths = SourcePaths::discover(std::path::Path::new("."), None);
/// let chain = Arc::new(standard_chain(&paths, Arc::new(LocalFilesystem::new())));
/// let loader = TemplateLoader::new(chain);
///
/// let layout = ProjectLayout::new("shop", "example.com/shop")?;
/// let name = TemplateName::new("project/go.mod.tmpl")?;
/// let text = loader.render(&name, &ProjectContext::from_layout(&layout, 2026))?;
/// # Ok::<(), hexago_core::error::HexagoError>(())
/// ```
pub struct TemplateLoader {
    chain: Arc<SourceChain>,
    env: Mutex<Environment<'static>>,
}

impl TemplateLoader {
    pub fn new(chain: Arc<SourceChain>) -> Self {
        Self {
            chain,
            env: Mutex::new(build_environment()),
        }
    }

    pub fn chain(&self) -> &Arc<SourceChain> {
        &self.chain
    }

    /// Render `name` against typed data.
    ///
    /// Templates in a known group only accept their own context kind.
    #[instrument(skip(self, data), fields(template = %name, kind = D::KIND.as_str()))]
    pub fn render<D: TemplateData>(&self, name: &TemplateName, data: &D) -> HexagoResult<String> {
        if let Some(expected) = ContextKind::for_template(name) {
            if expected != D::KIND {
                return Err(ApplicationError::ContextMismatch {
                    name: name.to_string(),
                    expected,
                    actual: D::KIND,
                }
                .into());
            }
        }
        self.render_value(name, Value::from_serialize(data))
    }

    /// Render `name` against an untyped context.
    pub fn render_value(&self, name: &TemplateName, ctx: Value) -> HexagoResult<String> {
        let mut env = self.env.lock().map_err(|_| ApplicationError::StoreLockError)?;

        if env.get_template(name.as_str()).is_err() {
            self.compile(&mut env, name)?;
        } else {
            trace!("parse cache hit");
        }

        let template = env
            .get_template(name.as_str())
            .map_err(|e| execution_error(name, &e))?;
        template.render(ctx).map_err(|e| execution_error(name, &e))
    }

    /// Resolve and parse `name` into the cache.
    fn compile(&self, env: &mut Environment<'static>, name: &TemplateName) -> HexagoResult<()> {
        let resolved = self.chain.resolve(name)?;
        let label = resolved.location.tier.label();
        let source = String::from_utf8(resolved.content).map_err(|e| {
            HexagoError::from(ApplicationError::TemplateSyntax {
                name: name.to_string(),
                source_label: label.into(),
                message: format!("template is not valid UTF-8: {e}"),
            })
        })?;

        env.add_template_owned(name.to_string(), source)
            .map_err(|e| syntax_error(name.as_str(), label, &e))?;
        debug!(source = %resolved.location, "parsed and cached template");
        Ok(())
    }

    /// Which tier supplies `name`. Never consults the cache.
    pub fn which(&self, name: &TemplateName) -> HexagoResult<SourceLocation> {
        self.chain.which(name)
    }

    pub fn exists(&self, name: &TemplateName) -> bool {
        self.chain.exists(name)
    }

    pub fn list(&self) -> Vec<TemplateName> {
        self.chain.list()
    }

    /// Whether `name` has already been parsed by this loader.
    pub fn is_cached(&self, name: &TemplateName) -> bool {
        self.env
            .lock()
            .map(|env| env.get_template(name.as_str()).is_ok())
            .unwrap_or(false)
    }

    /// Drop every parsed template so the next render re-resolves.
    pub fn invalidate_all(&self) -> HexagoResult<()> {
        let mut env = self.env.lock().map_err(|_| ApplicationError::StoreLockError)?;
        env.clear_templates();
        debug!("parse cache cleared");
        Ok(())
    }
}

impl TemplateRenderer for TemplateLoader {
    fn render_context(&self, name: &TemplateName, context: &RenderContext) -> HexagoResult<String> {
        match context {
            RenderContext::Project(ctx) => self.render(name, ctx),
            RenderContext::Service(ctx) => self.render(name, ctx),
            RenderContext::Domain(ctx) => self.render(name, ctx),
            RenderContext::Adapter(ctx) => self.render(name, ctx),
        }
    }
}

impl TemplateSyntaxChecker for TemplateLoader {
    fn check(&self, name: &str, source_label: &str, content: &str) -> HexagoResult<()> {
        let env = build_environment();
        env.template_from_named_str(name, content)
            .map(|_| ())
            .map_err(|e| syntax_error(name, source_label, &e))
    }
}

fn syntax_error(name: &str, source_label: &str, e: &minijinja::Error) -> HexagoError {
    ApplicationError::TemplateSyntax {
        name: name.to_owned(),
        source_label: source_label.to_owned(),
        message: e.to_string(),
    }
    .into()
}

fn execution_error(name: &TemplateName, e: &minijinja::Error) -> HexagoError {
    ApplicationError::TemplateExecution {
        name: name.to_string(),
        message: e.to_string(),
    }
    .into()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{EmbeddedSource, MemorySource};
    use hexago_core::application::ports::TemplateSource;
    use hexago_core::domain::{
        AdapterContext, DomainContext, FieldSpec, ProjectContext, ProjectLayout, ServiceContext,
        SourceTier,
    };

    // ── helpers ───────────────────────────────────────────────────────────

    fn name(s: &str) -> TemplateName {
        TemplateName::new(s).unwrap()
    }

    fn layout() -> ProjectLayout {
        ProjectLayout::new("shop", "example.com/shop").unwrap()
    }

    /// A loader over one project-local memory tier plus the real bundle.
    fn loader_with(project: &MemorySource) -> TemplateLoader {
        let sources: Vec<Box<dyn TemplateSource>> =
            vec![Box::new(project.clone()), Box::new(EmbeddedSource::new())];
        let chain = SourceChain::new(sources);
        TemplateLoader::new(Arc::new(chain))
    }

    fn is_kind(err: &HexagoError, f: impl Fn(&ApplicationError) -> bool) -> bool {
        matches!(err, HexagoError::Application(e) if f(e))
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn renders_embedded_service_template() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        let ctx = ServiceContext::new(&layout(), "createOrder", None);

        let out = loader.render(&name("service/service.go.tmpl"), &ctx).unwrap();
        assert!(out.starts_with("package services\n"));
        assert!(out.contains("type CreateOrderService struct{}"));
        assert!(out.contains("\"example.com/shop/internal/core/domain\""));
        assert!(out.contains("runs the create_order use case"));
    }

    #[test]
    fn every_bundled_template_renders_with_its_context() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        let layout = layout();
        let fields = vec![FieldSpec::new("email", "string"), FieldSpec::new("age", "int")];

        for n in loader.list() {
            let out = match ContextKind::for_template(&n) {
                Some(ContextKind::Service) => {
                    loader.render(&n, &ServiceContext::new(&layout, "order", None))
                }
                Some(ContextKind::Domain) => {
                    loader.render(&n, &DomainContext::new(&layout, "customer", fields.clone()))
                }
                Some(ContextKind::Adapter) => {
                    loader.render(&n, &AdapterContext::inbound(&layout, "http", "order"))
                }
                _ => loader.render(&n, &ProjectContext::from_layout(&layout, 2026)),
            };
            assert!(out.is_ok(), "{n}: {:?}", out.err());
        }
    }

    #[test]
    fn erased_context_keeps_kind_check() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        let fields = vec![FieldSpec::new("placedAt", "time.Time")];
        let ctx = RenderContext::from(DomainContext::new(&layout(), "order", fields));

        let out = loader
            .render_context(&name("domain/entity.go.tmpl"), &ctx)
            .unwrap();
        assert!(out.contains("\t\"time\"\n)"));
        assert!(out.contains("PlacedAt time.Time"));

        let err = loader
            .render_context(&name("adapter/http.go.tmpl"), &ctx)
            .unwrap_err();
        assert!(is_kind(&err, |e| matches!(e, ApplicationError::ContextMismatch { .. })));
    }

    #[test]
    fn value_object_imports_time_only_when_needed() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        let vo = name("domain/value_object.go.tmpl");

        let plain = DomainContext::new(&layout(), "money", vec![FieldSpec::new("amount", "int64")]);
        let out = loader.render(&vo, &plain).unwrap();
        assert!(out.starts_with("package domain\n\n// Money is"));

        let timed = DomainContext::new(&layout(), "period", vec![FieldSpec::new("start", "time.Time")]);
        let out = loader.render(&vo, &timed).unwrap();
        assert!(out.starts_with("package domain\n\nimport \"time\"\n\n// Period is"));
    }

    #[test]
    fn helpers_work_as_filters_and_functions() {
        let project = MemorySource::new(SourceTier::ProjectLocal).with_template(
            "custom/helpers.tmpl",
            "{{ project_name | upper }} {{ snake('CreateOrder') }} {{ title('order') }} {{ lower('X') }}",
        );
        let loader = loader_with(&project);

        let out = loader
            .render(
                &name("custom/helpers.tmpl"),
                &ProjectContext::from_layout(&layout(), 2026),
            )
            .unwrap();
        assert_eq!(out, "SHOP create_order Order x");
    }

    #[test]
    fn wrong_context_kind_is_rejected() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        let err = loader
            .render(
                &name("service/service.go.tmpl"),
                &ProjectContext::from_layout(&layout(), 2026),
            )
            .unwrap_err();

        assert!(is_kind(&err, |e| matches!(
            e,
            ApplicationError::ContextMismatch {
                expected: ContextKind::Service,
                actual: ContextKind::Project,
                ..
            }
        )));
    }

    #[test]
    fn undefined_variable_is_execution_error() {
        let project = MemorySource::new(SourceTier::ProjectLocal)
            .with_template("custom/strict.tmpl", "{{ no_such_field }}");
        let loader = loader_with(&project);

        let err = loader
            .render(
                &name("custom/strict.tmpl"),
                &ProjectContext::from_layout(&layout(), 2026),
            )
            .unwrap_err();
        assert!(is_kind(&err, |e| matches!(e, ApplicationError::TemplateExecution { .. })));
    }

    #[test]
    fn parse_failure_names_template_and_tier() {
        let project = MemorySource::new(SourceTier::ProjectLocal)
            .with_template("service/service.go.tmpl", "{% if x %}never closed");
        let loader = loader_with(&project);

        let err = loader
            .render(
                &name("service/service.go.tmpl"),
                &ServiceContext::new(&layout(), "order", None),
            )
            .unwrap_err();
        match err {
            HexagoError::Application(ApplicationError::TemplateSyntax {
                name, source_label, ..
            }) => {
                assert_eq!(name, "service/service.go.tmpl");
                assert_eq!(source_label, "project-local");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!loader.is_cached(&name("service/service.go.tmpl")));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        let err = loader
            .render(
                &name("project/nope.tmpl"),
                &ProjectContext::from_layout(&layout(), 2026),
            )
            .unwrap_err();
        assert!(is_kind(&err, |e| matches!(e, ApplicationError::TemplateNotFound { .. })));
    }

    // ── cache ─────────────────────────────────────────────────────────────

    #[test]
    fn cached_template_ignores_later_override_until_invalidated() {
        let project = MemorySource::new(SourceTier::ProjectLocal);
        let loader = loader_with(&project);
        let n = name("misc/gitignore.tmpl");
        let ctx = ProjectContext::from_layout(&layout(), 2026);

        let first = loader.render(&n, &ctx).unwrap();
        assert!(loader.is_cached(&n));

        project.insert("misc/gitignore.tmpl", "overridden\n");
        assert_eq!(loader.which(&n).unwrap().tier, SourceTier::ProjectLocal);
        assert_eq!(loader.render(&n, &ctx).unwrap(), first);

        let fresh = loader_with(&project);
        assert_eq!(fresh.render(&n, &ctx).unwrap(), "overridden\n");

        loader.invalidate_all().unwrap();
        assert!(!loader.is_cached(&n));
        assert_eq!(loader.render(&n, &ctx).unwrap(), "overridden\n");
    }

    // ── syntax checking ───────────────────────────────────────────────────

    #[test]
    fn syntax_check_reports_unterminated_directive() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        let err = loader
            .check("broken.tmpl", "file", "{% for x in items %}{{ x }}")
            .unwrap_err();
        assert!(err.to_string().to_lowercase().contains("syntax"));
    }

    #[test]
    fn syntax_check_accepts_helpers_and_unknown_variables() {
        let loader = loader_with(&MemorySource::new(SourceTier::ProjectLocal));
        loader
            .check("ok.tmpl", "file", "{{ anything | snake }} {{ title(other) }}")
            .unwrap();
    }
}
