//! `nomad up [NAME...]`: create, start and provision containers.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::container::check_prerequisites;
use crate::application::services::lifecycle::ApplyOptions;
use crate::commands::{TargetArgs, default_options, run_verb};
use crate::domain::Verb;

/// Arguments for the up command.
#[derive(Args, Debug, Default)]
pub struct UpArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Create and start only; do not run provisioners
    #[arg(long)]
    pub no_provision: bool,
}

/// Run `nomad up`.
///
/// # Errors
///
/// Returns an error if `lxc` is missing or too old, or if the project cannot
/// be loaded or a name is unknown.
pub async fn run(app: &AppContext, args: &UpArgs) -> Result<ExitCode> {
    check_prerequisites(&app.hypervisor).await?;
    let options = ApplyOptions {
        provision: !args.no_provision,
        ..default_options(app)
    };
    run_verb(app, Verb::Up, &args.targets, &options).await
}
