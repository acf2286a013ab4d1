//! `nomad status [NAME...]`: show live container states.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::{TargetArgs, default_options, run_verb};
use crate::domain::Verb;

/// Run `nomad status`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or a name is unknown.
pub async fn run(app: &AppContext, args: &TargetArgs) -> Result<ExitCode> {
    run_verb(app, Verb::Status, args, &default_options(app)).await
}
