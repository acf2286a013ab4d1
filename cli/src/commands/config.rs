//! `nomad config [--containers]`: validate and show the project file.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ProjectSource;

/// Arguments for the config command.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Display only container names, one per line
    #[arg(long)]
    pub containers: bool,
}

/// Run `nomad config`.
///
/// Prints the validated project with image defaults applied and script paths
/// resolved. Never contacts the hypervisor.
///
/// # Errors
///
/// Returns an error if the project file cannot be found, parsed or validated.
pub fn run(app: &AppContext, args: &ConfigArgs) -> Result<ExitCode> {
    let project = app.project_source.load()?;
    app.renderer().render_config(&project, args.containers)?;
    Ok(ExitCode::SUCCESS)
}
