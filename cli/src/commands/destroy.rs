//! `nomad destroy [-f] [NAME...]`: stop and remove containers.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::lifecycle::ApplyOptions;
use crate::commands::{TargetArgs, default_options, run_verb};
use crate::domain::Verb;

/// Arguments for the destroy command.
#[derive(Args, Debug, Default)]
pub struct DestroyArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Destroy without confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Run `nomad destroy`.
///
/// Asks once for the whole set, and only when at least one target exists.
/// Declining prints "Cancelled." and exits with status 1.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded, a name is unknown, or
/// the confirmation prompt cannot be shown.
pub async fn run(app: &AppContext, args: &DestroyArgs) -> Result<ExitCode> {
    let options = ApplyOptions {
        force: args.force,
        ..default_options(app)
    };
    run_verb(app, Verb::Destroy, &args.targets, &options).await
}
