//! `hexago add`: generate services, domain types and adapters.

use std::path::Path;
use std::sync::Arc;

use tracing::instrument;

use hexago_adapters::ProjectDetector;
use hexago_core::{
    application::{ComponentGenerator, Generated},
    domain::{ComponentName, DomainError, FieldSpec, parse_fields},
    error::HexagoError,
};

use super::TemplateWorkspace;
use crate::{
    cli::{AddCommands, DomainCommands, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    cmd: AddCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let ws = TemplateWorkspace::new(global.project_root()?, config);
    let project = ProjectDetector::new(Arc::clone(&ws.fs), &ws.root).detect()?;
    let generator = ComponentGenerator::new(
        ws.loader.clone(),
        Arc::clone(&ws.fs),
        project.root.clone(),
        project.layout,
    );

    let generated = match cmd {
        AddCommands::Service { name, description } => {
            generator.add_service(&component(&name)?, description.as_deref())?
        }
        AddCommands::Domain(DomainCommands::Entity { name, fields }) => {
            generator.add_entity(&component(&name)?, fields_of(fields.as_deref())?)?
        }
        AddCommands::Domain(DomainCommands::ValueObject { name, fields }) => {
            generator.add_value_object(&component(&name)?, fields_of(fields.as_deref())?)?
        }
        AddCommands::Adapter {
            direction,
            adapter_type,
            name,
        } => generator.add_adapter(direction, &adapter_type, &component(&name)?)?,
    };

    report(&generated, &project.root, output)
}

fn component(raw: &str) -> CliResult<ComponentName> {
    Ok(ComponentName::new(raw).map_err(HexagoError::from)?)
}

fn fields_of(raw: Option<&str>) -> CliResult<Vec<FieldSpec>> {
    let parsed: Result<_, DomainError> = raw.map_or(Ok(Vec::new()), parse_fields);
    Ok(parsed.map_err(HexagoError::from)?)
}

fn report(generated: &Generated, root: &Path, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(generated)?;
        return Ok(());
    }
    for file in &generated.files {
        let shown = file.strip_prefix(root).unwrap_or(file);
        output.success(&format!("Created {}", shown.display()))?;
    }
    Ok(())
}
