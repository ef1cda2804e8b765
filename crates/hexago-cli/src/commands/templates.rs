//! `hexago templates`: inspect, export, validate and reset templates.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, instrument};

use hexago_adapters::ProjectDetector;
use hexago_core::{
    domain::{
        AdapterContext, ContextKind, DomainContext, FieldSpec, OverrideTier, ProjectContext,
        ProjectLayout, ServiceContext, SourceLocation, SourceTier, TemplateName,
    },
    error::HexagoError,
};

use super::TemplateWorkspace;
use crate::{
    cli::{GlobalArgs, TemplatesCommands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    cmd: TemplatesCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let ws = TemplateWorkspace::new(global.project_root()?, config);

    match cmd {
        TemplatesCommands::List => list(&ws, output),
        TemplatesCommands::Which { name } => which(&ws, &parse_name(&name)?, output),
        TemplatesCommands::Export { name, global } => {
            export(&ws, &parse_name(&name)?, OverrideTier::from_global(global), output)
        }
        TemplatesCommands::ExportAll { global, force } => {
            export_all(&ws, OverrideTier::from_global(global), force, output)
        }
        TemplatesCommands::Validate { file } => validate(&ws, &file, output),
        TemplatesCommands::Reset { name, global } => {
            reset(&ws, &parse_name(&name)?, OverrideTier::from_global(global), output)
        }
        TemplatesCommands::Preview { name, subject } => {
            preview(&ws, &parse_name(&name)?, &subject, output)
        }
    }
}

fn parse_name(raw: &str) -> CliResult<TemplateName> {
    Ok(TemplateName::new(raw).map_err(HexagoError::from)?)
}

// ── list / which ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Listed<'a> {
    name: &'a TemplateName,
    source: SourceTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
}

fn list(ws: &TemplateWorkspace, output: &OutputManager) -> CliResult<()> {
    let names = ws.chain.list();
    let resolved: Vec<(TemplateName, SourceLocation)> = names
        .into_iter()
        .filter_map(|name| {
            let location = ws.chain.which(&name).ok()?;
            Some((name, location))
        })
        .collect();

    if output.is_json() {
        let listed: Vec<Listed<'_>> = resolved
            .iter()
            .map(|(name, location)| Listed {
                name,
                source: location.tier,
                path: location.path.as_deref(),
            })
            .collect();
        output.json(&listed)?;
        return Ok(());
    }

    let mut groups: BTreeMap<&str, Vec<&(TemplateName, SourceLocation)>> = BTreeMap::new();
    for entry in &resolved {
        groups.entry(entry.0.group()).or_default().push(entry);
    }

    output.header(&format!("Available templates ({} total):", resolved.len()))?;
    output.print("")?;
    for (group, entries) in groups {
        output.print(&format!("  {group}/"))?;
        for (name, location) in entries {
            if location.is_override() {
                let marker = output.dim(&format!("<- {}", location.tier));
                output.print(&format!("    {:<44} {marker}", name.file_name()))?;
            } else {
                output.print(&format!("    {}", name.file_name()))?;
            }
        }
    }
    output.print("")?;
    output.info("Use 'hexago templates which <name>' for the full override path.")?;
    output.info("Use 'hexago templates export <name>' to start customizing a template.")?;
    Ok(())
}

fn which(ws: &TemplateWorkspace, name: &TemplateName, output: &OutputManager) -> CliResult<()> {
    let location = ws.loader.which(name)?;

    if output.is_json() {
        output.json(&Listed {
            name,
            source: location.tier,
            path: location.path.as_deref(),
        })?;
    } else {
        output.raw(&format!("{name} -> {location}\n"))?;
    }
    Ok(())
}

// ── overrides ─────────────────────────────────────────────────────────────────

fn export(
    ws: &TemplateWorkspace,
    name: &TemplateName,
    tier: OverrideTier,
    output: &OutputManager,
) -> CliResult<()> {
    let exported = ws.overrides.export(name, tier)?;

    if output.is_json() {
        output.json(&exported)?;
        return Ok(());
    }
    output.success(&format!("Template exported to: {}", exported.to.display()))?;
    output.info("Edit it and re-run your hexago commands to use the customized version.")?;
    Ok(())
}

fn export_all(
    ws: &TemplateWorkspace,
    tier: OverrideTier,
    force: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let summary = ws.overrides.export_all(tier, force)?;

    if output.is_json() {
        output.json(&summary)?;
    } else {
        for exported in &summary.exported {
            output.success(exported.name.as_str())?;
        }
        for (name, reason) in &summary.failed {
            output.error(&format!("{name}: {reason}"))?;
        }

        let base = ws
            .tier_base(tier)
            .map(|b| b.display().to_string())
            .unwrap_or_else(|| tier.to_string());
        let mut line = format!(
            "Exported {} template(s) to {base}",
            summary.exported.len()
        );
        if !summary.skipped.is_empty() {
            line.push_str(&format!(
                " ({} skipped, already exist, use --force to overwrite)",
                summary.skipped.len()
            ));
        }
        output.print("")?;
        output.print(&line)?;
    }

    if summary.is_clean() {
        Ok(())
    } else {
        Err(CliError::ExportIncomplete {
            failed: summary.failed.len(),
        })
    }
}

fn validate(ws: &TemplateWorkspace, file: &Path, output: &OutputManager) -> CliResult<()> {
    match ws.overrides.validate_syntax(file) {
        Ok(()) => {
            output.success(&format!("{}: template syntax is valid", file.display()))?;
            Ok(())
        }
        Err(e) => {
            output.error(&file.display().to_string())?;
            Err(e.into())
        }
    }
}

fn reset(
    ws: &TemplateWorkspace,
    name: &TemplateName,
    tier: OverrideTier,
    output: &OutputManager,
) -> CliResult<()> {
    let removed = ws.overrides.reset(name, tier)?;
    output.success(&format!("Removed {tier} override for: {name}"))?;
    debug!(path = %removed.display(), "override removed");

    match ws.chain.which(name) {
        Ok(now) => output.info(&format!("{name} now resolves to {now}"))?,
        Err(_) => output.info(&format!("{name} is no longer provided by any source"))?,
    }
    Ok(())
}

// ── preview ───────────────────────────────────────────────────────────────────

/// Render `name` with sample data built around `subject`.
fn preview(
    ws: &TemplateWorkspace,
    name: &TemplateName,
    subject: &str,
    output: &OutputManager,
) -> CliResult<()> {
    let layout = preview_layout(ws);
    let year = chrono::Local::now().year();

    let text = match ContextKind::for_template(name) {
        Some(ContextKind::Service) => ws
            .loader
            .render(name, &ServiceContext::new(&layout, subject, None))?,
        Some(ContextKind::Domain) => ws.loader.render(
            name,
            &DomainContext::new(&layout, subject, sample_fields()),
        )?,
        Some(ContextKind::Adapter) => {
            let adapter_type = adapter_type(name);
            let ctx = if adapter_type == "http" {
                AdapterContext::inbound(&layout, adapter_type, subject)
            } else {
                AdapterContext::outbound(&layout, adapter_type, subject)
            };
            ws.loader.render(name, &ctx)?
        }
        Some(ContextKind::Project) | None => ws
            .loader
            .render(name, &ProjectContext::from_layout(&layout, year))?,
    };

    output.raw(&text)?;
    Ok(())
}

/// The detected project's layout, or a placeholder outside a project.
fn preview_layout(ws: &TemplateWorkspace) -> ProjectLayout {
    match ProjectDetector::new(Arc::clone(&ws.fs), &ws.root).detect() {
        Ok(project) => project.layout,
        Err(e) => {
            debug!(error = %e, "no project detected, using placeholder layout");
            let dir = ws
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "app".to_owned());
            let module = format!("example.com/{dir}");
            ProjectLayout::new(dir, module).unwrap_or_else(|_| placeholder_layout())
        }
    }
}

fn placeholder_layout() -> ProjectLayout {
    ProjectLayout {
        project_name: "app".into(),
        module_name: "example.com/app".into(),
        adapter_style: Default::default(),
        core_logic: Default::default(),
    }
}

fn sample_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("email", "string"),
        FieldSpec::new("active", "bool"),
    ]
}

/// `adapter/http.go.tmpl` → `http`.
fn adapter_type(name: &TemplateName) -> &str {
    let file = name.file_name();
    file.split('.').next().unwrap_or(file)
}
