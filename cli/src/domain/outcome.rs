//! Lifecycle verbs and per-target outcomes.

use std::fmt;

use nomad_common::{ContainerStatus, OutcomeKind, OutcomeRecord};

use crate::domain::error::OrchestrationError;

/// The closed set of lifecycle verbs the orchestrator applies to a target set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Up,
    Halt,
    Destroy,
    Provision,
    Status,
}

impl Verb {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Halt => "halt",
            Self::Destroy => "destroy",
            Self::Provision => "provision",
            Self::Status => "status",
        }
    }

    /// Label for success lines, e.g. "web halted".
    #[must_use]
    pub fn done_label(self) -> &'static str {
        match self {
            Self::Up => "is up",
            Self::Halt => "halted",
            Self::Destroy => "destroyed",
            Self::Provision => "provisioned",
            Self::Status => "inspected",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of applying a verb to one container.
#[derive(Debug)]
pub enum Outcome {
    Succeeded,
    Skipped(String),
    Failed(OrchestrationError),
}

/// One outcome per target, in target order.
#[derive(Debug)]
pub struct OperationOutcome {
    pub container: String,
    pub outcome: Outcome,
    /// Observed status; always set by `status`, otherwise when known.
    pub status: Option<ContainerStatus>,
}

impl OperationOutcome {
    #[must_use]
    pub fn succeeded(container: &str) -> Self {
        Self::new(container, Outcome::Succeeded)
    }

    #[must_use]
    pub fn skipped(container: &str, reason: &str) -> Self {
        Self::new(container, Outcome::Skipped(reason.to_string()))
    }

    #[must_use]
    pub fn failed(container: &str, error: OrchestrationError) -> Self {
        Self::new(container, Outcome::Failed(error))
    }

    #[must_use]
    pub fn with_status(mut self, status: ContainerStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    fn new(container: &str, outcome: Outcome) -> Self {
        Self {
            container: container.to_string(),
            outcome,
            status: None,
        }
    }
}

impl From<&OperationOutcome> for OutcomeRecord {
    fn from(op: &OperationOutcome) -> Self {
        let outcome = match &op.outcome {
            Outcome::Succeeded => OutcomeKind::Succeeded,
            Outcome::Skipped(reason) => OutcomeKind::Skipped {
                reason: reason.clone(),
            },
            Outcome::Failed(err) => OutcomeKind::Failed {
                error: format!("{err:#}"),
            },
        };
        Self {
            container: op.container.clone(),
            outcome,
            status: op.status,
        }
    }
}

/// `true` when at least one target failed.
#[must_use]
pub fn any_failed(outcomes: &[OperationOutcome]) -> bool {
    outcomes.iter().any(OperationOutcome::is_failed)
}
