//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `nomad_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use anyhow::Result;
use nomad_common::{ContainerDeclaration, ContainerStatus};

use crate::domain::Project;

// ── Hypervisor Port Traits ────────────────────────────────────────────────────
//
// Every method takes the hypervisor instance name. Implementations hold only
// immutable configuration, so calls for different instances may be in flight
// at the same time.

/// Live-state inspection.
#[allow(async_fn_in_trait)]
pub trait InstanceInspector {
    /// Current status of an instance; `Absent` when it was never created.
    async fn status(&self, instance: &str) -> Result<ContainerStatus>;
    /// Raw version report of the hypervisor client.
    async fn version(&self) -> Result<String>;
}

/// Instance lifecycle operations: create, start, stop, remove.
#[allow(async_fn_in_trait)]
pub trait InstanceLifecycle {
    /// Create (but do not start) an instance from its declaration.
    async fn create(&self, instance: &str, declaration: &ContainerDeclaration) -> Result<()>;
    async fn start(&self, instance: &str) -> Result<()>;
    async fn stop(&self, instance: &str) -> Result<()>;
    /// Remove a stopped instance.
    async fn remove(&self, instance: &str) -> Result<()>;
}

/// Runs declared provisioners against a running instance.
#[allow(async_fn_in_trait)]
pub trait InstanceProvisioner {
    async fn provision(&self, instance: &str, declaration: &ContainerDeclaration) -> Result<()>;
}

/// Interactive shell access.
#[allow(async_fn_in_trait)]
pub trait ShellExecutor {
    /// Open a login shell with inherited stdio and wait for it to exit.
    async fn exec_interactive(&self, instance: &str, username: Option<&str>)
    -> Result<ExitStatus>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
///
/// Final per-container results are not reported here; they are returned as
/// outcomes and rendered in target order.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Confirmation Port ─────────────────────────────────────────────────────────

/// Yes/no question asked before destructive operations.
pub trait ConfirmationPrompt {
    /// Returns `true` only on an explicit affirmative answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be asked (e.g. no TTY).
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

// ── Project Port ──────────────────────────────────────────────────────────────

/// Abstracts locating and loading the project file.
pub trait ProjectSource {
    /// Path of the project file that `load` would read.
    fn locate(&self) -> Result<PathBuf>;
    /// Load and validate the project.
    fn load(&self) -> Result<Project>;
}
