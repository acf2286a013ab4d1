//! Lifecycle orchestration: applies one verb across a resolved target set.
//!
//! Imports only from `crate::domain` and `crate::application`.
//!
//! Per-target work is independent: a failure on one container becomes that
//! container's `Failed` outcome and never stops the others. Targets are
//! processed through an ordered buffered stream, so up to `jobs` containers
//! are in flight at once while outcomes still come back in target order.

use std::future::Future;

use anyhow::Result;
use futures_util::{StreamExt, stream};
use nomad_common::ContainerStatus;

use crate::application::ports::{
    ConfirmationPrompt, InstanceInspector, InstanceLifecycle, InstanceProvisioner,
    ProgressReporter,
};
use crate::application::services::container;
use crate::domain::{
    ContainerHandle, OperationOutcome, OrchestrationError, ResolvedTargetSet, Verb,
};

/// Options shared by all verbs.
#[derive(Debug, Clone, Copy)]
pub struct ApplyOptions {
    /// Skip the destroy confirmation.
    pub force: bool,
    /// Run provisioners during `up`.
    pub provision: bool,
    /// Maximum number of targets processed concurrently; `0` is treated as `1`.
    pub jobs: usize,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            force: false,
            provision: true,
            jobs: 1,
        }
    }
}

/// Apply `verb` to every target and return one outcome per target, in order.
///
/// # Errors
///
/// Only `destroy` can fail as a whole: `ConfirmationDeclined` when the user
/// answers no, or `Transport` when the prompt itself cannot be shown. In both
/// cases no destructive call has been issued. Every other failure is reported
/// in the returned outcomes.
pub async fn apply<H>(
    verb: Verb,
    targets: &ResolvedTargetSet<'_>,
    options: &ApplyOptions,
    hv: &H,
    prompt: &impl ConfirmationPrompt,
    reporter: &impl ProgressReporter,
) -> Result<Vec<OperationOutcome>, OrchestrationError>
where
    H: InstanceInspector + InstanceLifecycle + InstanceProvisioner,
{
    let jobs = options.jobs.max(1);
    tracing::debug!(%verb, targets = ?targets.names(), jobs, "applying verb");

    let outcomes = match verb {
        Verb::Up => {
            for_each_target(targets.iter(), jobs, |h| {
                up(hv, h, options.provision, reporter)
            })
            .await
        }
        Verb::Halt => for_each_target(targets.iter(), jobs, |h| halt(hv, h, reporter)).await,
        Verb::Destroy => return destroy(targets, options, hv, prompt, reporter).await,
        Verb::Provision => {
            for_each_target(targets.iter(), jobs, |h| provision(hv, h, reporter)).await
        }
        Verb::Status => for_each_target(targets.iter(), jobs, |h| status(hv, h)).await,
    };
    Ok(outcomes)
}

/// Run `f` over `items` with at most `jobs` futures in flight, preserving
/// input order in the result.
async fn for_each_target<T, F, Fut>(
    items: impl IntoIterator<Item = T>,
    jobs: usize,
    f: F,
) -> Vec<OperationOutcome>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = OperationOutcome>,
{
    stream::iter(items).map(f).buffered(jobs).collect().await
}

fn finish(
    handle: &ContainerHandle,
    result: Result<ContainerStatus, OrchestrationError>,
) -> OperationOutcome {
    match result {
        Ok(status) => OperationOutcome::succeeded(handle.name()).with_status(status),
        Err(err) => {
            tracing::debug!(container = handle.name(), error = %format!("{err:#}"), "target failed");
            OperationOutcome::failed(handle.name(), err)
        }
    }
}

// ── up ────────────────────────────────────────────────────────────────────────

async fn up<H>(
    hv: &H,
    handle: &ContainerHandle,
    provision: bool,
    reporter: &impl ProgressReporter,
) -> OperationOutcome
where
    H: InstanceInspector + InstanceLifecycle + InstanceProvisioner,
{
    let current = match container::status(hv, handle).await {
        Ok(s) => s,
        Err(err) => return finish(handle, Err(err.into())),
    };
    if current.is_running() && !provision {
        return OperationOutcome::skipped(handle.name(), "already running")
            .with_status(ContainerStatus::Running);
    }
    finish(handle, bring_up(hv, handle, current, provision, reporter).await)
}

/// create → start → provision; each step at most once, never reordered.
async fn bring_up<H>(
    hv: &H,
    handle: &ContainerHandle,
    current: ContainerStatus,
    provision: bool,
    reporter: &impl ProgressReporter,
) -> Result<ContainerStatus, OrchestrationError>
where
    H: InstanceLifecycle + InstanceProvisioner,
{
    let (name, instance) = (handle.name(), handle.instance());

    if !current.exists() {
        reporter.step(&format!("{name}: creating..."));
        hv.create(instance, handle.declaration()).await?;
    }
    if !current.is_running() {
        reporter.step(&format!("{name}: starting..."));
        hv.start(instance).await?;
    }
    if provision {
        reporter.step(&format!("{name}: provisioning..."));
        hv.provision(instance, handle.declaration()).await?;
    }
    Ok(ContainerStatus::Running)
}

// ── halt ──────────────────────────────────────────────────────────────────────

async fn halt<H>(hv: &H, handle: &ContainerHandle, reporter: &impl ProgressReporter) -> OperationOutcome
where
    H: InstanceInspector + InstanceLifecycle,
{
    match container::status(hv, handle).await {
        Ok(ContainerStatus::Running) => {
            reporter.step(&format!("{}: stopping...", handle.name()));
            let result = hv.stop(handle.instance()).await;
            finish(handle, result.map(|()| ContainerStatus::Stopped).map_err(Into::into))
        }
        Ok(other) => OperationOutcome::skipped(handle.name(), "not running").with_status(other),
        Err(err) => finish(handle, Err(err.into())),
    }
}

// ── destroy ───────────────────────────────────────────────────────────────────

/// Two phases: one confirmation for the whole set, then per-target removal.
///
/// The confirmation is asked only when at least one target exists; a target
/// whose state cannot be read counts as existing.
async fn destroy<H>(
    targets: &ResolvedTargetSet<'_>,
    options: &ApplyOptions,
    hv: &H,
    prompt: &impl ConfirmationPrompt,
    reporter: &impl ProgressReporter,
) -> Result<Vec<OperationOutcome>, OrchestrationError>
where
    H: InstanceInspector + InstanceLifecycle,
{
    let jobs = options.jobs.max(1);
    let observed: Vec<Result<ContainerStatus>> = stream::iter(targets.iter())
        .map(|h| container::status(hv, h))
        .buffered(jobs)
        .collect()
        .await;

    let any_exists = observed
        .iter()
        .any(|s| s.as_ref().map_or(true, |s| s.exists()));

    if any_exists {
        reporter.warn(&format!(
            "The following containers will be removed: {}",
            targets.names().join(", ")
        ));
        if !options.force && !prompt.confirm("Are you sure?")? {
            return Err(OrchestrationError::ConfirmationDeclined);
        }
    }

    let outcomes = for_each_target(targets.iter().zip(observed), jobs, |(h, state)| {
        destroy_one(hv, h, state, reporter)
    })
    .await;
    Ok(outcomes)
}

async fn destroy_one<H>(
    hv: &H,
    handle: &ContainerHandle,
    observed: Result<ContainerStatus>,
    reporter: &impl ProgressReporter,
) -> OperationOutcome
where
    H: InstanceLifecycle,
{
    let state = match observed {
        Ok(ContainerStatus::Absent) => {
            return OperationOutcome::skipped(handle.name(), "does not exist")
                .with_status(ContainerStatus::Absent);
        }
        Ok(state) => state,
        Err(err) => return finish(handle, Err(err.into())),
    };

    let result = async {
        reporter.step(&format!("{}: destroying...", handle.name()));
        if state.is_running() {
            hv.stop(handle.instance()).await?;
        }
        hv.remove(handle.instance()).await?;
        Ok::<_, OrchestrationError>(ContainerStatus::Absent)
    }
    .await;
    finish(handle, result)
}

// ── provision ─────────────────────────────────────────────────────────────────

async fn provision<H>(
    hv: &H,
    handle: &ContainerHandle,
    reporter: &impl ProgressReporter,
) -> OperationOutcome
where
    H: InstanceInspector + InstanceProvisioner,
{
    match container::status(hv, handle).await {
        Ok(ContainerStatus::Running) => {
            reporter.step(&format!("{}: provisioning...", handle.name()));
            let result = hv.provision(handle.instance(), handle.declaration()).await;
            finish(handle, result.map(|()| ContainerStatus::Running).map_err(Into::into))
        }
        Ok(other) => OperationOutcome::failed(
            handle.name(),
            OrchestrationError::NotProvisionable(handle.name().to_string()),
        )
        .with_status(other),
        Err(err) => finish(handle, Err(err.into())),
    }
}

// ── status ────────────────────────────────────────────────────────────────────

async fn status(hv: &impl InstanceInspector, handle: &ContainerHandle) -> OperationOutcome {
    finish(handle, container::status(hv, handle).await.map_err(Into::into))
}
