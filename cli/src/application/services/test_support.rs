//! Shared test doubles for service tests.
//!
//! `FakeHypervisor` keeps an in-memory instance table and records every port
//! call so tests can assert on ordering and on what was (not) issued.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::process::ExitStatus;
use std::time::Duration;

use anyhow::Result;
use nomad_common::{ContainerDeclaration, ContainerStatus};

use crate::application::ports::{
    ConfirmationPrompt, InstanceInspector, InstanceLifecycle, InstanceProvisioner,
    ProgressReporter, ShellExecutor,
};

/// Build an `ExitStatus` from a logical exit code (cross-platform).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status(String),
    Create(String),
    Start(String),
    Stop(String),
    Remove(String),
    Provision(String),
    Exec(String, Option<String>),
}

impl Call {
    pub fn is_destructive(&self) -> bool {
        matches!(self, Call::Stop(_) | Call::Remove(_))
    }
}

#[derive(Default)]
pub struct FakeHypervisor {
    states: RefCell<HashMap<String, ContainerStatus>>,
    failing: RefCell<HashMap<(String, &'static str), String>>,
    delays: HashMap<String, Duration>,
    calls: RefCell<Vec<Call>>,
}

impl FakeHypervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an instance with the given status.
    pub fn with(self, instance: &str, status: ContainerStatus) -> Self {
        self.states.borrow_mut().insert(instance.to_string(), status);
        self
    }

    /// Make `op` (e.g. `"start"`) fail for `instance`.
    pub fn failing(self, instance: &str, op: &'static str) -> Self {
        self.failing
            .borrow_mut()
            .insert((instance.to_string(), op), format!("{op} {instance}: exit status 1"));
        self
    }

    /// Delay every status query for `instance`.
    pub fn slow(mut self, instance: &str, delay: Duration) -> Self {
        self.delays.insert(instance.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn destructive_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_destructive).collect()
    }

    pub fn state_of(&self, instance: &str) -> ContainerStatus {
        self.states
            .borrow()
            .get(instance)
            .copied()
            .unwrap_or(ContainerStatus::Absent)
    }

    fn record(&self, call: Call, instance: &str, op: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if let Some(msg) = self.failing.borrow().get(&(instance.to_string(), op)) {
            anyhow::bail!("{msg}");
        }
        Ok(())
    }

    fn set(&self, instance: &str, status: ContainerStatus) {
        self.states.borrow_mut().insert(instance.to_string(), status);
    }
}

impl InstanceInspector for FakeHypervisor {
    async fn status(&self, instance: &str) -> Result<ContainerStatus> {
        if let Some(delay) = self.delays.get(instance) {
            tokio::time::sleep(*delay).await;
        }
        self.record(Call::Status(instance.to_string()), instance, "status")?;
        Ok(self.state_of(instance))
    }

    async fn version(&self) -> Result<String> {
        Ok("Client version: 5.21.1\nServer version: 5.21.1\n".to_string())
    }
}

impl InstanceLifecycle for FakeHypervisor {
    async fn create(&self, instance: &str, _: &ContainerDeclaration) -> Result<()> {
        self.record(Call::Create(instance.to_string()), instance, "create")?;
        self.set(instance, ContainerStatus::Stopped);
        Ok(())
    }

    async fn start(&self, instance: &str) -> Result<()> {
        self.record(Call::Start(instance.to_string()), instance, "start")?;
        self.set(instance, ContainerStatus::Running);
        Ok(())
    }

    async fn stop(&self, instance: &str) -> Result<()> {
        self.record(Call::Stop(instance.to_string()), instance, "stop")?;
        self.set(instance, ContainerStatus::Stopped);
        Ok(())
    }

    async fn remove(&self, instance: &str) -> Result<()> {
        self.record(Call::Remove(instance.to_string()), instance, "remove")?;
        self.states.borrow_mut().remove(instance);
        Ok(())
    }
}

impl InstanceProvisioner for FakeHypervisor {
    async fn provision(&self, instance: &str, _: &ContainerDeclaration) -> Result<()> {
        self.record(Call::Provision(instance.to_string()), instance, "provision")
    }
}

impl ShellExecutor for FakeHypervisor {
    async fn exec_interactive(&self, instance: &str, username: Option<&str>) -> Result<ExitStatus> {
        self.record(
            Call::Exec(instance.to_string(), username.map(String::from)),
            instance,
            "exec",
        )?;
        Ok(exit_status(0))
    }
}

/// Answers every question with a fixed value and counts the questions.
pub struct PromptStub {
    answer: bool,
    asked: Cell<usize>,
}

impl PromptStub {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Cell::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

impl ConfirmationPrompt for PromptStub {
    fn confirm(&self, _: &str) -> Result<bool> {
        self.asked.set(self.asked.get() + 1);
        Ok(self.answer)
    }
}

pub struct ReporterStub;

impl ProgressReporter for ReporterStub {
    fn step(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
