//! Container identity and naming rules.

use std::sync::LazyLock;

use nomad_common::ContainerDeclaration;
use regex::Regex;

use crate::domain::error::ProjectError;

/// Hostname-safe names; LXD rejects anything else as an instance name.
pub static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Compile-time constant pattern.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z]([a-z0-9-]{0,61}[a-z0-9])?$").expect("valid regex")
});

/// Longest instance name the hypervisor accepts.
pub const MAX_INSTANCE_NAME: usize = 63;

/// Validates a project or container name.
///
/// # Errors
///
/// Returns `ProjectError::InvalidName` if the name is not hostname-safe.
pub fn validate_name(name: &str) -> Result<(), ProjectError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ProjectError::InvalidName(name.to_string()))
    }
}

/// Hypervisor instance name for a declared container: `<project>-<container>`.
#[must_use]
pub fn instance_name(project: &str, container: &str) -> String {
    format!("{project}-{container}")
}

/// One declared container plus the instance name it maps to.
///
/// Handles carry no live state; status is read from the hypervisor on every
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle {
    declaration: ContainerDeclaration,
    instance: String,
}

impl ContainerHandle {
    #[must_use]
    pub fn new(project: &str, declaration: ContainerDeclaration) -> Self {
        let instance = instance_name(project, &declaration.name);
        Self {
            declaration,
            instance,
        }
    }

    /// Declared name, unique within the project.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// Name of the instance on the hypervisor.
    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    #[must_use]
    pub fn declaration(&self) -> &ContainerDeclaration {
        &self.declaration
    }
}
