//! Command implementations

pub mod config;
pub mod destroy;
pub mod halt;
pub mod provision;
pub mod shell;
pub mod status;
pub mod up;

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ProjectSource;
use crate::application::services::lifecycle::{self, ApplyOptions};
use crate::domain::{OperationOutcome, OrchestrationError, Registry, Verb, any_failed, resolve};

/// Container selection shared by the lifecycle verbs.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Container names (default: every container of the project)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}

/// `0` when every outcome succeeded or was skipped, `1` otherwise.
#[must_use]
pub fn exit_code(outcomes: &[OperationOutcome]) -> ExitCode {
    if any_failed(outcomes) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load the project, resolve `targets`, apply `verb` and render the outcomes.
///
/// # Errors
///
/// Returns project loading and resolution errors before any hypervisor call,
/// and `ConfirmationDeclined` in JSON mode. Per-container failures are
/// rendered and reflected in the exit code instead.
pub async fn run_verb(
    app: &AppContext,
    verb: Verb,
    targets: &TargetArgs,
    options: &ApplyOptions,
) -> Result<ExitCode> {
    let project = app.project_source.load()?;
    let registry = Registry::new(&project);
    let targets = resolve(&targets.names, &registry)?;
    tracing::debug!(project = %project.name, %verb, "resolved targets");

    let reporter = app.reporter();
    match lifecycle::apply(verb, &targets, options, &app.hypervisor, app, &reporter).await {
        Ok(outcomes) => {
            app.renderer().render_outcomes(verb, &outcomes)?;
            Ok(exit_code(&outcomes))
        }
        Err(OrchestrationError::ConfirmationDeclined) if !app.is_json() => {
            println!("Cancelled.");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

/// Options for verbs that take none of their own.
#[must_use]
pub fn default_options(app: &AppContext) -> ApplyOptions {
    ApplyOptions {
        jobs: app.jobs,
        ..ApplyOptions::default()
    }
}
