//! `nomad shell [NAME] [-u USER]`: open a login shell in a container.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ProjectSource;
use crate::application::services::shell;
use crate::domain::Registry;

/// Arguments for the shell command.
#[derive(Args, Debug, Default)]
pub struct ShellArgs {
    /// Container name (optional when the project declares one container)
    pub name: Option<String>,

    /// Log in as this user instead of root
    #[arg(short, long)]
    pub username: Option<String>,
}

/// Run `nomad shell`. The shell's exit code becomes nomad's exit code.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded, the target cannot be
/// resolved to exactly one running container, or `lxc exec` cannot start.
pub async fn run(app: &AppContext, args: &ShellArgs) -> Result<ExitCode> {
    let project = app.project_source.load()?;
    let registry = Registry::new(&project);
    let status = shell::open(
        &app.hypervisor,
        &registry,
        args.name.as_deref(),
        args.username.as_deref(),
    )
    .await?;

    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
