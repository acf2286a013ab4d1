//! Live-state queries for declared containers.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use nomad_common::ContainerStatus;

use crate::application::ports::InstanceInspector;
use crate::domain::ContainerHandle;

/// Oldest `lxc` client whose CLI and JSON output nomad relies on.
const LXC_MIN_VERSION: semver::Version = semver::Version::new(4, 0, 0);

/// Current status of a declared container. Never cached.
///
/// # Errors
///
/// Returns the hypervisor error if the state cannot be queried.
pub async fn status(hv: &impl InstanceInspector, handle: &ContainerHandle) -> Result<ContainerStatus> {
    hv.status(handle.instance())
        .await
        .with_context(|| format!("querying state of '{}'", handle.name()))
}

/// Check that the hypervisor client is installed and recent enough.
///
/// Versions that cannot be parsed are let through.
///
/// # Errors
///
/// Returns an error if the client is missing or older than 4.0.
pub async fn check_prerequisites(hv: &impl InstanceInspector) -> Result<()> {
    let report = hv.version().await.map_err(|_| {
        anyhow::anyhow!("LXD client 'lxc' not available.\n\nInstall LXD: https://canonical.com/lxd/install")
    })?;
    if let Some(version) = parse_client_version(&report)
        && version < LXC_MIN_VERSION
    {
        anyhow::bail!("lxc {version} is too old; nomad needs {LXC_MIN_VERSION} or newer.");
    }
    Ok(())
}

/// Parse the client version out of `lxc version` output.
///
/// Accepts both `Client version: 5.21.1` and a bare `5.21.1`; two-component
/// versions such as `4.0` are padded with `.0`.
fn parse_client_version(report: &str) -> Option<semver::Version> {
    let line = report.lines().next()?;
    let raw = line.rsplit(':').next()?.trim();
    let padded = if raw.matches('.').count() == 1 {
        format!("{raw}.0")
    } else {
        raw.to_string()
    };
    semver::Version::parse(&padded).ok()
}
