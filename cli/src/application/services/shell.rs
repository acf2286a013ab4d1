//! Shell session initiation.
//!
//! Imports only from `crate::domain` and `crate::application`.

use std::process::ExitStatus;

use nomad_common::ContainerStatus;

use crate::application::ports::{InstanceInspector, ShellExecutor};
use crate::application::services::container;
use crate::domain::{ContainerHandle, OrchestrationError, Registry, resolve};

/// Pick the single container a shell should be opened in.
///
/// Without a name, a project declaring exactly one container selects it.
///
/// # Errors
///
/// `NotFound` for an undeclared name, `AmbiguousTarget` when no name is
/// given and the project declares more than one container.
pub fn select<'r>(
    name: Option<&str>,
    registry: &'r Registry,
) -> Result<&'r ContainerHandle, OrchestrationError> {
    let requested: Vec<&str> = name.into_iter().collect();
    let targets = resolve(&requested, registry).map_err(|err| match err {
        OrchestrationError::UnknownContainer(name) => OrchestrationError::NotFound(name),
        other => other,
    })?;
    match targets.handles() {
        [only] => Ok(only),
        _ => Err(OrchestrationError::AmbiguousTarget {
            count: targets.len(),
            names: targets.names().join(", "),
        }),
    }
}

/// Open an interactive login shell in one container and wait for it to end.
///
/// Root gets a login shell unless `username` is given, in which case the
/// session runs `su -l <username>`.
///
/// # Errors
///
/// Resolution errors from [`select`], `NotRunning` if the container is not
/// running, and `Transport` when the hypervisor cannot be reached.
pub async fn open<H>(
    hv: &H,
    registry: &Registry,
    name: Option<&str>,
    username: Option<&str>,
) -> Result<ExitStatus, OrchestrationError>
where
    H: InstanceInspector + ShellExecutor,
{
    let handle = select(name, registry)?;
    match container::status(hv, handle).await? {
        ContainerStatus::Running => {}
        _ => return Err(OrchestrationError::NotRunning(handle.name().to_string())),
    }
    tracing::debug!(container = handle.name(), user = ?username, "opening shell");
    Ok(hv.exec_interactive(handle.instance(), username).await?)
}
