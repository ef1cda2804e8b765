//! Integration tests for hexago-core's public API.

use std::collections::BTreeMap;
use std::path::PathBuf;

use hexago_core::application::ApplicationError;
use hexago_core::domain::{ContextKind, scan_imports};
use hexago_core::prelude::*;

/// A fixed set of templates at one tier.
struct FakeSource {
    tier: SourceTier,
    templates: BTreeMap<&'static str, &'static str>,
}

impl FakeSource {
    fn boxed(tier: SourceTier, templates: &[(&'static str, &'static str)]) -> Box<dyn TemplateSource> {
        Box::new(Self {
            tier,
            templates: templates.iter().copied().collect(),
        })
    }
}

impl TemplateSource for FakeSource {
    fn tier(&self) -> SourceTier {
        self.tier
    }

    fn exists(&self, name: &TemplateName) -> bool {
        self.templates.contains_key(name.as_str())
    }

    fn read(&self, name: &TemplateName) -> HexagoResult<Vec<u8>> {
        self.templates
            .get(name.as_str())
            .map(|c| c.as_bytes().to_vec())
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn location(&self, name: &TemplateName) -> SourceLocation {
        SourceLocation {
            tier: self.tier,
            path: self.base_dir().map(|b| name.under(&b)),
        }
    }

    fn base_dir(&self) -> Option<PathBuf> {
        (self.tier != SourceTier::Embedded).then(|| PathBuf::from(format!("/{}", self.tier.label())))
    }

    fn catalogue(&self) -> Vec<TemplateName> {
        self.templates
            .keys()
            .filter_map(|k| TemplateName::new(*k).ok())
            .collect()
    }
}

#[test]
fn every_tier_combination_resolves_to_the_highest_priority_holder() {
    let name = TemplateName::new("service/service.go.tmpl").unwrap();

    // Each bit decides whether the tier at that position holds the template.
    for mask in 1u8..16 {
        let sources: Vec<_> = SourceTier::ALL
            .iter()
            .enumerate()
            .map(|(i, tier)| {
                let held: &[(&str, &str)] = if mask & (1 << i) != 0 {
                    &[("service/service.go.tmpl", "x")]
                } else {
                    &[]
                };
                FakeSource::boxed(*tier, held)
            })
            .collect();
        let chain = SourceChain::new(sources);

        let expected = SourceTier::ALL[mask.trailing_zeros() as usize];
        assert_eq!(chain.which(&name).unwrap().tier, expected, "mask {mask:04b}");
    }
}

#[test]
fn list_ignores_override_only_names() {
    let chain = SourceChain::new(vec![
        FakeSource::boxed(SourceTier::Embedded, &[("project/main.go.tmpl", "")]),
        FakeSource::boxed(SourceTier::UserGlobal, &[("custom/extra.tmpl", "")]),
    ]);

    let names = chain.list();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].as_str(), "project/main.go.tmpl");
    assert_eq!(
        ContextKind::for_template(&names[0]),
        Some(ContextKind::Project)
    );
}

#[test]
fn which_reports_concrete_override_path() {
    let chain = SourceChain::new(vec![
        FakeSource::boxed(SourceTier::Embedded, &[("domain/entity.go.tmpl", "")]),
        FakeSource::boxed(SourceTier::ProjectLocal, &[("domain/entity.go.tmpl", "")]),
    ]);

    let location = chain
        .which(&TemplateName::new("domain/entity.go.tmpl").unwrap())
        .unwrap();
    assert!(location.is_override());
    assert_eq!(
        location.path,
        Some(PathBuf::from("/project-local/domain/entity.go.tmpl"))
    );
}

#[test]
fn scanner_handles_generated_service_header() {
    let src = "// Code generated by hexago.\npackage services\n\nimport (\n\t\"context\"\n\n\t\"example.com/shop/internal/core/domain\"\n)\n\ntype OrderService struct{}\n";
    assert_eq!(
        scan_imports(src).unwrap(),
        vec!["context", "example.com/shop/internal/core/domain"]
    );
}
