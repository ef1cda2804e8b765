//! `hexago validate`: check dependency direction in a Go project.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use hexago_adapters::{LocalFilesystem, ProjectDetector};
use hexago_core::{
    application::{ArchitectureValidator, ports::Filesystem},
    domain::{ProjectLayout, ValidationReport},
};

use crate::{
    cli::GlobalArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct JsonReport<'a> {
    project: &'a ProjectLayout,
    #[serde(flatten)]
    report: &'a ValidationReport,
    passed: bool,
}

#[instrument(skip_all)]
pub fn execute(global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let root = global.project_root()?;
    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());

    let project = ProjectDetector::new(Arc::clone(&fs), &root).detect()?;
    let layout = project.layout;
    let report = ArchitectureValidator::new(fs, &root, layout.clone()).validate();

    if output.is_json() {
        output.json(&JsonReport {
            project: &layout,
            report: &report,
            passed: !report.has_errors(),
        })?;
    } else {
        print_report(&layout, &report, output)?;
    }

    if report.has_errors() {
        return Err(CliError::ValidationFailed {
            errors: report.error_count(),
        });
    }
    Ok(())
}

fn print_report(
    layout: &ProjectLayout,
    report: &ValidationReport,
    output: &OutputManager,
) -> std::io::Result<()> {
    output.header(&format!("Validating project: {}", layout.project_name))?;
    output.print(&format!("   Module: {}", layout.module_name))?;
    output.print(&format!("   Adapter style: {}", layout.adapter_style))?;
    output.print(&format!("   Core logic: {}", layout.core_logic))?;
    output.print("")?;

    for check in &report.successes {
        output.success(check)?;
    }
    if !report.warnings.is_empty() {
        output.print("")?;
        for warning in &report.warnings {
            output.warning(warning)?;
        }
    }
    if !report.errors.is_empty() {
        output.print("")?;
        for error in &report.errors {
            output.error(error)?;
        }
    }

    output.print("")?;
    output.header("Summary:")?;
    output.print(&format!("   Passed:   {}", report.successes.len()))?;
    output.print(&format!("   Warnings: {}", report.warnings.len()))?;
    output.print(&format!("   Errors:   {}", report.errors.len()))?;
    output.print("")?;

    if report.has_errors() {
        output.error("Validation FAILED")
    } else if report.has_warnings() {
        output.warning("Validation passed with warnings")
    } else {
        output.success("Validation PASSED")
    }
}
