//! `nomad halt [NAME...]`: stop running containers.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::{TargetArgs, default_options, run_verb};
use crate::domain::Verb;

/// Run `nomad halt`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or a name is unknown.
pub async fn run(app: &AppContext, args: &TargetArgs) -> Result<ExitCode> {
    run_verb(app, Verb::Halt, args, &default_options(app)).await
}
