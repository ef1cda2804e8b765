//! Component Generator - render Go components into an existing project.
//!
//! Services land in the business-logic directory, entities and value
//! objects in the domain directory, adapters under
//! `internal/adapters/<direction>/<type>/`. File names are the snake-case
//! component name.
//!
//! Generation is all-or-nothing up to the write step: every target is
//! checked for existence and every template rendered before the first
//! byte is written. Existing files are never replaced.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{
        AdapterContext, AdapterDirection, ComponentName, DomainContext, DomainError, FieldSpec,
        ProjectLayout, RenderContext, ServiceContext, TemplateName,
    },
    error::HexagoResult,
};

/// Files written by one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    pub component: ComponentName,
    /// Absolute paths, in the order they were written.
    pub files: Vec<PathBuf>,
}

/// One template and the file suffix its output gets.
struct Output {
    template: &'static str,
    suffix: &'static str,
}

const SERVICE: &[Output] = &[
    Output { template: "service/service.go.tmpl", suffix: "" },
    Output { template: "service/service_test.go.tmpl", suffix: "_test" },
];

const ENTITY: &[Output] = &[
    Output { template: "domain/entity.go.tmpl", suffix: "" },
    Output { template: "domain/entity_test.go.tmpl", suffix: "_test" },
];

const VALUE_OBJECT: &[Output] = &[Output { template: "domain/value_object.go.tmpl", suffix: "" }];

/// Generates components for one detected project.
pub struct ComponentGenerator {
    renderer: Arc<dyn TemplateRenderer>,
    fs: Arc<dyn Filesystem>,
    root: PathBuf,
    layout: ProjectLayout,
}

impl ComponentGenerator {
    pub fn new(
        renderer: Arc<dyn TemplateRenderer>,
        fs: Arc<dyn Filesystem>,
        root: impl Into<PathBuf>,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            renderer,
            fs,
            root: root.into(),
            layout,
        }
    }

    /// `<logic>/<name>.go` plus its test.
    #[instrument(skip(self), fields(component = %name))]
    pub fn add_service(
        &self,
        name: &ComponentName,
        description: Option<&str>,
    ) -> HexagoResult<Generated> {
        let dir = self.existing_dir(&self.layout.core_logic_dir())?;
        let ctx = ServiceContext::new(&self.layout, name.as_str(), description);
        self.generate(&dir, name, SERVICE, &ctx.into())
    }

    /// `domain/<name>.go` plus its test.
    #[instrument(skip(self, fields), fields(component = %name, field_count = fields.len()))]
    pub fn add_entity(&self, name: &ComponentName, fields: Vec<FieldSpec>) -> HexagoResult<Generated> {
        let dir = self.existing_dir(ProjectLayout::DOMAIN_DIR)?;
        let ctx = DomainContext::new(&self.layout, name.as_str(), fields);
        self.generate(&dir, name, ENTITY, &ctx.into())
    }

    /// `domain/<name>.go`.
    #[instrument(skip(self, fields), fields(component = %name, field_count = fields.len()))]
    pub fn add_value_object(
        &self,
        name: &ComponentName,
        fields: Vec<FieldSpec>,
    ) -> HexagoResult<Generated> {
        let dir = self.existing_dir(ProjectLayout::DOMAIN_DIR)?;
        let ctx = DomainContext::new(&self.layout, name.as_str(), fields);
        self.generate(&dir, name, VALUE_OBJECT, &ctx.into())
    }

    /// `adapters/<direction>/<type>/<name>.go`. The type directory is
    /// created when missing.
    #[instrument(skip(self), fields(component = %name, direction = %direction))]
    pub fn add_adapter(
        &self,
        direction: AdapterDirection,
        adapter_type: &str,
        name: &ComponentName,
    ) -> HexagoResult<Generated> {
        let valid = direction.adapter_types();
        if !valid.contains(&adapter_type) {
            return Err(DomainError::UnknownAdapterType {
                direction: direction.dir(self.layout.adapter_style).to_owned(),
                value: adapter_type.to_owned(),
                valid: valid.iter().map(|t| (*t).to_owned()).collect(),
            }
            .into());
        }

        let dir = self
            .root
            .join(ProjectLayout::ADAPTERS_DIR)
            .join(direction.dir(self.layout.adapter_style))
            .join(adapter_type);
        let template = format!("adapter/{adapter_type}.go.tmpl");
        let ctx = AdapterContext::for_direction(&self.layout, direction, adapter_type, name.as_str());

        let targets = vec![(TemplateName::new(&template)?, dir.join(go_file(name, "")))];
        self.write_all(&dir, name, targets, &ctx.into())
    }

    fn existing_dir(&self, rel: &str) -> HexagoResult<PathBuf> {
        let dir = self.root.join(rel);
        if !self.fs.is_dir(&dir) {
            return Err(DomainError::ProjectNotDetected {
                path: self.root.clone(),
                reason: format!("{rel} not found"),
            }
            .into());
        }
        Ok(dir)
    }

    fn generate(
        &self,
        dir: &Path,
        name: &ComponentName,
        outputs: &[Output],
        ctx: &RenderContext,
    ) -> HexagoResult<Generated> {
        let targets = outputs
            .iter()
            .map(|o| -> HexagoResult<_> {
                Ok((TemplateName::new(o.template)?, dir.join(go_file(name, o.suffix))))
            })
            .collect::<HexagoResult<Vec<_>>>()?;
        self.write_all(dir, name, targets, ctx)
    }

    fn write_all(
        &self,
        dir: &Path,
        name: &ComponentName,
        targets: Vec<(TemplateName, PathBuf)>,
        ctx: &RenderContext,
    ) -> HexagoResult<Generated> {
        if let Some((_, path)) = targets.iter().find(|(_, path)| self.fs.exists(path)) {
            return Err(ApplicationError::FileExists { path: path.clone() }.into());
        }

        let rendered = targets
            .into_iter()
            .map(|(template, path)| -> HexagoResult<_> {
                let text = self.renderer.render_context(&template, ctx)?;
                debug!(template = %template, bytes = text.len(), "rendered");
                Ok((path, text))
            })
            .collect::<HexagoResult<Vec<_>>>()?;

        self.fs.create_dir_all(dir)?;
        let mut files = Vec::with_capacity(rendered.len());
        for (path, text) in rendered {
            self.fs.write_file(&path, text.as_bytes())?;
            info!(path = %path.display(), "wrote file");
            files.push(path);
        }

        Ok(Generated {
            component: name.clone(),
            files,
        })
    }
}

fn go_file(name: &ComponentName, suffix: &str) -> String {
    format!("{}{suffix}.go", name.file_stem())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateRenderer};
    use crate::domain::{AdapterStyle, ContextKind};
    use crate::error::HexagoError;

    type Files = Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("shop", "example.com/shop").unwrap()
    }

    fn name(s: &str) -> ComponentName {
        ComponentName::new(s).unwrap()
    }

    /// Echoes the template name and context kind.
    fn echo_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render_context()
            .returning(|n, ctx| Ok(format!("{n} {}", ctx.kind())));
        renderer
    }

    /// Every directory exists; writes land in `files`.
    fn recording_fs(files: Files) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let e = Arc::clone(&files);
        fs.expect_exists()
            .returning(move |p| e.lock().unwrap().contains_key(p));
        let w = Arc::clone(&files);
        fs.expect_write_file().returning(move |p, c| {
            w.lock().unwrap().insert(p.to_path_buf(), c.to_vec());
            Ok(())
        });
        fs
    }

    fn generator(files: Files, layout: ProjectLayout) -> ComponentGenerator {
        ComponentGenerator::new(
            Arc::new(echo_renderer()),
            Arc::new(recording_fs(files)),
            "/proj",
            layout,
        )
    }

    fn text(files: &Files, path: &str) -> String {
        String::from_utf8(files.lock().unwrap()[Path::new(path)].clone()).unwrap()
    }

    #[test]
    fn service_writes_source_and_test() {
        let files = Files::default();
        let generated = generator(files.clone(), layout())
            .add_service(&name("createOrder"), None)
            .unwrap();

        assert_eq!(
            generated.files,
            vec![
                PathBuf::from("/proj/internal/core/services/create_order.go"),
                PathBuf::from("/proj/internal/core/services/create_order_test.go"),
            ]
        );
        assert_eq!(
            text(&files, "/proj/internal/core/services/create_order_test.go"),
            "service/service_test.go.tmpl service"
        );
    }

    #[test]
    fn value_object_has_no_test_file() {
        let files = Files::default();
        let generated = generator(files.clone(), layout())
            .add_value_object(&name("Money"), vec![FieldSpec::new("amount", "int64")])
            .unwrap();

        assert_eq!(
            generated.files,
            vec![PathBuf::from("/proj/internal/core/domain/money.go")]
        );
        assert_eq!(
            text(&files, "/proj/internal/core/domain/money.go"),
            format!("domain/value_object.go.tmpl {}", ContextKind::Domain)
        );
    }

    #[test]
    fn adapter_goes_under_project_direction_dir() {
        let files = Files::default();
        let layout = layout().with_adapter_style(AdapterStyle::DriverDriven);
        let generated = generator(files, layout)
            .add_adapter(AdapterDirection::Outbound, "database", &name("orderRepository"))
            .unwrap();

        assert_eq!(
            generated.files,
            vec![PathBuf::from(
                "/proj/internal/adapters/driven/database/order_repository.go"
            )]
        );
    }

    #[test]
    fn unknown_adapter_type_lists_alternatives() {
        let err = generator(Files::default(), layout())
            .add_adapter(AdapterDirection::Inbound, "grpc", &name("Orders"))
            .unwrap_err();
        match err {
            HexagoError::Domain(e) => assert_eq!(
                e,
                DomainError::UnknownAdapterType {
                    direction: "primary".into(),
                    value: "grpc".into(),
                    valid: vec!["http".into()],
                }
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn existing_target_blocks_every_write() {
        let files = Files::default();
        files.lock().unwrap().insert(
            PathBuf::from("/proj/internal/core/domain/order_test.go"),
            b"mine".to_vec(),
        );
        let err = generator(files.clone(), layout())
            .add_entity(&name("Order"), Vec::new())
            .unwrap_err();

        assert!(matches!(
            err,
            HexagoError::Application(ApplicationError::FileExists { ref path })
                if path.ends_with("order_test.go")
        ));
        let files = files.lock().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[Path::new("/proj/internal/core/domain/order_test.go")], b"mine");
    }

    #[test]
    fn missing_logic_dir_is_not_detected() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);
        let generator = ComponentGenerator::new(
            Arc::new(MockTemplateRenderer::new()),
            Arc::new(fs),
            "/proj",
            layout(),
        );

        let err = generator.add_service(&name("Billing"), None).unwrap_err();
        match err {
            HexagoError::Domain(DomainError::ProjectNotDetected { reason, .. }) => {
                assert_eq!(reason, "internal/core/services not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn render_failure_writes_nothing() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render_context().returning(|n, _| {
            Err(ApplicationError::TemplateExecution {
                name: n.to_string(),
                message: "undefined value".into(),
            }
            .into())
        });
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().never();
        let generator = ComponentGenerator::new(Arc::new(renderer), Arc::new(fs), "/proj", layout());

        assert!(generator.add_service(&name("Billing"), Some("bills")).is_err());
    }
}
