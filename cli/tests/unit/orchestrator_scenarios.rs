//! End-to-end scenarios through resolution and orchestration, with an
//! in-memory hypervisor and a `mockall` confirmation prompt.

#![allow(clippy::expect_used)]

use nomad_cli::application::services::lifecycle::{ApplyOptions, apply};
use nomad_cli::application::services::shell;
use nomad_cli::domain::{OperationOutcome, OrchestrationError, Outcome, Verb, resolve};
use nomad_common::ContainerStatus;

use crate::helpers::{inst, registry};
use crate::mocks::{MemoryHypervisor, MockPrompt, WarnLog, silent_prompt};

fn names(outcomes: &[OperationOutcome]) -> Vec<&str> {
    outcomes.iter().map(|o| o.container.as_str()).collect()
}

fn forced() -> ApplyOptions {
    ApplyOptions {
        force: true,
        ..ApplyOptions::default()
    }
}

#[tokio::test]
async fn status_of_subset_reflects_live_state() {
    let reg = registry(&["web", "db"]);
    let hv = MemoryHypervisor::new().with(&inst("db"), ContainerStatus::Running);

    let targets = resolve(&["db"], &reg).expect("resolve");
    let out = apply(
        Verb::Status,
        &targets,
        &ApplyOptions::default(),
        &hv,
        &silent_prompt(),
        &WarnLog::default(),
    )
    .await
    .expect("apply");

    assert_eq!(names(&out), ["db"]);
    assert_eq!(out[0].status, Some(ContainerStatus::Running));
    assert_eq!(hv.log(), ["status shop-db"]);
}

#[tokio::test]
async fn unknown_name_fails_before_any_call() {
    let reg = registry(&["web", "db"]);
    let hv = MemoryHypervisor::new();

    let err = resolve(&["web", "cache"], &reg).expect_err("expected Err");

    assert!(matches!(err, OrchestrationError::UnknownContainer(ref n) if n == "cache"));
    assert!(hv.log().is_empty());
}

#[tokio::test]
async fn forced_destroy_touches_only_existing() {
    let reg = registry(&["web", "db"]);
    let hv = MemoryHypervisor::new().with(&inst("web"), ContainerStatus::Running);
    let reporter = WarnLog::default();

    let targets = resolve(&[] as &[&str], &reg).expect("resolve");
    let out = apply(Verb::Destroy, &targets, &forced(), &hv, &silent_prompt(), &reporter)
        .await
        .expect("apply");

    assert_eq!(names(&out), ["web", "db"]);
    assert!(matches!(out[0].outcome, Outcome::Succeeded));
    assert!(matches!(&out[1].outcome, Outcome::Skipped(r) if r == "does not exist"));
    assert_eq!(hv.mutations(), ["stop shop-web", "remove shop-web"]);
    assert_eq!(hv.state(&inst("web")), ContainerStatus::Absent);
    assert_eq!(
        reporter.0.lock().expect("mutex poisoned").as_slice(),
        ["The following containers will be removed: web, db"]
    );
}

#[tokio::test]
async fn declined_destroy_asks_once_and_removes_nothing() {
    let reg = registry(&["web", "db"]);
    let hv = MemoryHypervisor::new()
        .with(&inst("web"), ContainerStatus::Stopped)
        .with(&inst("db"), ContainerStatus::Running);
    let mut prompt = MockPrompt::new();
    prompt
        .expect_confirm()
        .withf(|q| q == "Are you sure?")
        .times(1)
        .returning(|_| Ok(false));

    let targets = resolve(&["web", "db"], &reg).expect("resolve");
    let err = apply(
        Verb::Destroy,
        &targets,
        &ApplyOptions::default(),
        &hv,
        &prompt,
        &WarnLog::default(),
    )
    .await
    .expect_err("expected Err");

    assert!(matches!(err, OrchestrationError::ConfirmationDeclined));
    assert!(hv.mutations().is_empty());
}

#[tokio::test]
async fn destroy_prompt_failure_touches_nothing() {
    let reg = registry(&["web"]);
    let hv = MemoryHypervisor::new().with(&inst("web"), ContainerStatus::Stopped);
    let mut prompt = MockPrompt::new();
    prompt
        .expect_confirm()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("not a terminal")));

    let targets = resolve(&["web"], &reg).expect("resolve");
    let err = apply(
        Verb::Destroy,
        &targets,
        &ApplyOptions::default(),
        &hv,
        &prompt,
        &WarnLog::default(),
    )
    .await
    .expect_err("expected Err");

    assert!(matches!(err, OrchestrationError::Transport(_)));
    assert!(hv.mutations().is_empty());
}

#[tokio::test]
async fn up_then_halt_then_destroy_round_trip() {
    let reg = registry(&["web", "db"]);
    let hv = MemoryHypervisor::new();
    let all = resolve(&[] as &[&str], &reg).expect("resolve");
    let reporter = WarnLog::default();

    let up = apply(Verb::Up, &all, &ApplyOptions::default(), &hv, &silent_prompt(), &reporter)
        .await
        .expect("up");
    assert!(up.iter().all(|o| matches!(o.outcome, Outcome::Succeeded)));
    assert_eq!(hv.state(&inst("db")), ContainerStatus::Running);

    let halt = apply(Verb::Halt, &all, &ApplyOptions::default(), &hv, &silent_prompt(), &reporter)
        .await
        .expect("halt");
    assert!(halt.iter().all(|o| o.status == Some(ContainerStatus::Stopped)));

    let again = apply(Verb::Halt, &all, &ApplyOptions::default(), &hv, &silent_prompt(), &reporter)
        .await
        .expect("halt");
    assert!(again.iter().all(|o| matches!(o.outcome, Outcome::Skipped(_))));

    let mut prompt = MockPrompt::new();
    prompt.expect_confirm().times(1).returning(|_| Ok(true));
    apply(Verb::Destroy, &all, &ApplyOptions::default(), &hv, &prompt, &reporter)
        .await
        .expect("destroy");
    assert_eq!(hv.state(&inst("web")), ContainerStatus::Absent);
    assert_eq!(hv.state(&inst("db")), ContainerStatus::Absent);
}

#[tokio::test]
async fn failing_sibling_does_not_abort_others() {
    let reg = registry(&["web", "db", "cache"]);
    let hv = MemoryHypervisor::new()
        .with(&inst("web"), ContainerStatus::Running)
        .with(&inst("db"), ContainerStatus::Running)
        .with(&inst("cache"), ContainerStatus::Running)
        .failing("stop shop-db");

    let all = resolve(&[] as &[&str], &reg).expect("resolve");
    let out = apply(
        Verb::Halt,
        &all,
        &ApplyOptions::default(),
        &hv,
        &silent_prompt(),
        &WarnLog::default(),
    )
    .await
    .expect("apply");

    assert!(matches!(out[0].outcome, Outcome::Succeeded));
    assert!(out[1].is_failed());
    assert!(matches!(out[2].outcome, Outcome::Succeeded));
    assert_eq!(hv.state(&inst("cache")), ContainerStatus::Stopped);
}

#[tokio::test]
async fn shell_rejects_stopped_container() {
    let reg = registry(&["web"]);
    let hv = MemoryHypervisor::new().with(&inst("web"), ContainerStatus::Stopped);
    let err = shell::open(&hv, &reg, None, None)
        .await
        .expect_err("expected Err");
    assert!(matches!(err, OrchestrationError::NotRunning(ref n) if n == "web"));
    assert!(hv.mutations().is_empty());
}
