use std::fmt;

use serde::{Deserialize, Serialize};

/// Live state of a container as observed from the hypervisor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Running,
    Stopped,
    /// The container has not been created.
    Absent,
    /// The hypervisor reported a state nomad does not model (frozen, error...).
    Unknown,
}

impl ContainerStatus {
    #[must_use]
    pub fn exists(self) -> bool {
        self != Self::Absent
    }

    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Absent => "not created",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Serialized result of one lifecycle verb against one container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum OutcomeKind {
    Succeeded,
    Skipped { reason: String },
    Failed { error: String },
}

/// One row of `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub container: String,
    #[serde(flatten)]
    pub outcome: OutcomeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContainerStatus>,
}

/// Full `--json` report for a verb invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeReport {
    pub verb: String,
    /// `false` when any outcome failed.
    pub ok: bool,
    pub outcomes: Vec<OutcomeRecord>,
}
