//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Orchestration errors ──────────────────────────────────────────────────────

/// Errors raised while resolving targets or applying a lifecycle verb.
///
/// `UnknownContainer`, `NotFound`, `AmbiguousTarget` and `ConfirmationDeclined`
/// abort the whole invocation before any side effect. The remaining variants
/// are reported per target inside `Outcome::Failed`.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("No such container in this project: {0}")]
    UnknownContainer(String),

    #[error("Container '{0}' not found.")]
    NotFound(String),

    #[error("Container '{0}' is not running. Run 'nomad up {0}' first.")]
    NotProvisionable(String),

    #[error("Container '{0}' is not running. Start it with: nomad up {0}")]
    NotRunning(String),

    #[error("This project declares {count} containers; name one of: {names}")]
    AmbiguousTarget { count: usize, names: String },

    #[error("Destroy cancelled. No container was touched.")]
    ConfirmationDeclined,

    /// Hypervisor failure, wrapped but not interpreted.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl OrchestrationError {
    /// Short machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownContainer(_) => "UNKNOWN_CONTAINER",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotProvisionable(_) => "NOT_PROVISIONABLE",
            Self::NotRunning(_) => "NOT_RUNNING",
            Self::AmbiguousTarget { .. } => "AMBIGUOUS_TARGET",
            Self::ConfirmationDeclined => "CONFIRMATION_DECLINED",
            Self::Transport(_) => "TRANSPORT",
        }
    }
}

// ── Project errors ────────────────────────────────────────────────────────────

/// Errors related to locating and validating the project file.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("No nomad.yml found in {0} or any parent directory.")]
    NotFound(PathBuf),

    #[error("Cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("The project does not declare any container.")]
    Empty,

    #[error("Container '{0}' is declared more than once.")]
    DuplicateName(String),

    #[error("Invalid name '{0}': must match ^[a-z]([a-z0-9-]{{0,61}}[a-z0-9])?$")]
    InvalidName(String),

    #[error("Instance name '{0}' exceeds 63 characters; shorten the project or container name.")]
    NameTooLong(String),

    #[error("Container '{0}' has no image and the project declares no default image.")]
    MissingImage(String),

    #[error("Container '{container}': shell provisioner #{index} must set exactly one of 'inline' or 'script'.")]
    InvalidProvisioner { container: String, index: usize },
}

impl ProjectError {
    /// Short machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PROJECT_NOT_FOUND",
            Self::Parse { .. } => "PROJECT_PARSE_ERROR",
            _ => "PROJECT_INVALID",
        }
    }
}
