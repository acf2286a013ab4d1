//! Infrastructure implementation of the hypervisor port traits over LXD.
//!
//! `LxcHypervisor<R>` drives the `lxc` client through a `CommandRunner`.
//! It holds only its two runners, so calls for different instances can be in
//! flight at once.

use std::path::Path;
use std::process::{ExitStatus, Output};

use anyhow::{Context, Result};
use nomad_common::{ContainerDeclaration, ContainerStatus, Provisioner, ShellProvisioner};
use serde::Deserialize;

use crate::application::ports::{
    CommandRunner, InstanceInspector, InstanceLifecycle, InstanceProvisioner, ShellExecutor,
};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, LONG_CMD_TIMEOUT, TokioCommandRunner};

const LXC: &str = "lxc";

/// Where script provisioners are pushed inside the container before running.
pub const REMOTE_SCRIPT_PATH: &str = "/tmp/nomad-provision.sh";

/// Remote used for image aliases that name none.
const DEFAULT_IMAGE_REMOTE: &str = "images";

/// Adapter that routes every hypervisor call through `lxc`.
///
/// Generic over `R: CommandRunner` so tests can inject a recording runner.
/// `long_runner` is used for `init` (may download an image) and for
/// provisioning; everything else goes through `cmd_runner`.
pub struct LxcHypervisor<R: CommandRunner> {
    cmd_runner: R,
    long_runner: R,
}

impl<R: CommandRunner> LxcHypervisor<R> {
    pub fn new(cmd_runner: R, long_runner: R) -> Self {
        Self {
            cmd_runner,
            long_runner,
        }
    }
}

impl LxcHypervisor<TokioCommandRunner> {
    /// Production adapter with the default timeouts.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(
            TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT),
            TokioCommandRunner::new(LONG_CMD_TIMEOUT),
        )
    }
}

/// Turn a non-zero exit into an error carrying the client's stderr.
fn check(output: Output, what: &str) -> Result<Output> {
    if output.status.success() {
        return Ok(output);
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim().trim_start_matches("Error: ");
    if stderr.is_empty() {
        anyhow::bail!("{what} failed ({})", output.status);
    }
    anyhow::bail!("{what} failed: {stderr}")
}

/// Qualify bare image aliases with the public image remote.
#[must_use]
pub fn image_ref(image: &str) -> String {
    if image.contains(':') {
        image.to_string()
    } else {
        format!("{DEFAULT_IMAGE_REMOTE}:{image}")
    }
}

/// Arguments for `lxc init`.
#[must_use]
pub fn init_args(instance: &str, declaration: &ContainerDeclaration) -> Vec<String> {
    let image = declaration.image.as_deref().unwrap_or_default();
    let mut args = vec!["init".to_string(), image_ref(image), instance.to_string()];
    if declaration.privileged {
        args.push("-c".to_string());
        args.push("security.privileged=true".to_string());
    }
    for (key, value) in &declaration.environment {
        args.push("-c".to_string());
        args.push(format!("environment.{key}={value}"));
    }
    args
}

#[derive(Deserialize)]
struct InstanceState {
    status: String,
}

/// Map the `status` field of `/1.0/instances/<name>/state`.
fn parse_state(json: &[u8]) -> Result<ContainerStatus> {
    let state: InstanceState =
        serde_json::from_slice(json).context("parsing lxc instance state")?;
    Ok(match state.status.as_str() {
        "Running" => ContainerStatus::Running,
        "Stopped" => ContainerStatus::Stopped,
        _ => ContainerStatus::Unknown,
    })
}

fn is_not_found(output: &Output) -> bool {
    String::from_utf8_lossy(&output.stderr)
        .to_lowercase()
        .contains("not found")
}

impl<R: CommandRunner> InstanceInspector for LxcHypervisor<R> {
    async fn status(&self, instance: &str) -> Result<ContainerStatus> {
        let endpoint = format!("/1.0/instances/{instance}/state");
        let output = self
            .cmd_runner
            .run(LXC, &["query", &endpoint])
            .await
            .context("lxc query")?;
        if !output.status.success() && is_not_found(&output) {
            return Ok(ContainerStatus::Absent);
        }
        let output = check(output, "lxc query")?;
        parse_state(&output.stdout)
    }

    async fn version(&self) -> Result<String> {
        let output = self
            .cmd_runner
            .run(LXC, &["version"])
            .await
            .context("lxc version")?;
        let output = check(output, "lxc version")?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl<R: CommandRunner> InstanceLifecycle for LxcHypervisor<R> {
    async fn create(&self, instance: &str, declaration: &ContainerDeclaration) -> Result<()> {
        let args = init_args(instance, declaration);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self
            .long_runner
            .run(LXC, &args)
            .await
            .context("lxc init")?;
        check(output, "lxc init").map(drop)
    }

    async fn start(&self, instance: &str) -> Result<()> {
        let output = self
            .cmd_runner
            .run(LXC, &["start", instance])
            .await
            .context("lxc start")?;
        check(output, "lxc start").map(drop)
    }

    async fn stop(&self, instance: &str) -> Result<()> {
        let output = self
            .cmd_runner
            .run(LXC, &["stop", instance])
            .await
            .context("lxc stop")?;
        check(output, "lxc stop").map(drop)
    }

    async fn remove(&self, instance: &str) -> Result<()> {
        let output = self
            .cmd_runner
            .run(LXC, &["delete", instance])
            .await
            .context("lxc delete")?;
        check(output, "lxc delete").map(drop)
    }
}

impl<R: CommandRunner> LxcHypervisor<R> {
    async fn run_inline(&self, instance: &str, command: &str) -> Result<()> {
        tracing::debug!(instance, command, "running inline provisioner");
        let output = self
            .long_runner
            .run(LXC, &["exec", instance, "--", "sh", "-c", command])
            .await
            .context("lxc exec")?;
        check(output, "provisioning command").map(drop)
    }

    async fn run_script(&self, instance: &str, script: &Path) -> Result<()> {
        tracing::debug!(instance, script = %script.display(), "running script provisioner");
        let local = script.to_string_lossy();
        let remote = format!("{instance}{REMOTE_SCRIPT_PATH}");
        let output = self
            .cmd_runner
            .run(LXC, &["file", "push", &local, &remote, "--mode", "0755"])
            .await
            .context("lxc file push")?;
        check(output, "lxc file push")?;

        let output = self
            .long_runner
            .run(LXC, &["exec", instance, "--", "sh", REMOTE_SCRIPT_PATH])
            .await
            .context("lxc exec")?;
        check(output, &format!("provisioning script {}", script.display())).map(drop)
    }
}

impl<R: CommandRunner> InstanceProvisioner for LxcHypervisor<R> {
    async fn provision(&self, instance: &str, declaration: &ContainerDeclaration) -> Result<()> {
        for (i, provisioner) in declaration.provisioning.iter().enumerate() {
            let Provisioner::Shell(ShellProvisioner { inline, script }) = provisioner;
            match (inline, script) {
                (Some(command), _) => self.run_inline(instance, command).await,
                (None, Some(path)) => self.run_script(instance, Path::new(path)).await,
                (None, None) => Err(anyhow::anyhow!("nothing to run")),
            }
            .with_context(|| format!("provisioner #{} of {instance}", i + 1))?;
        }
        Ok(())
    }
}

impl<R: CommandRunner> ShellExecutor for LxcHypervisor<R> {
    async fn exec_interactive(&self, instance: &str, username: Option<&str>) -> Result<ExitStatus> {
        let user = username.unwrap_or("root");
        self.cmd_runner
            .run_status(LXC, &["exec", instance, "--", "su", "-l", user])
            .await
            .context("lxc exec")
    }
}
