//! Schema of the `nomad.yml` project file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level project file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    /// Project name, used as the prefix of every hypervisor instance name.
    pub name: String,
    /// Default image for containers that do not declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Declared containers, in declaration order.
    #[serde(default)]
    pub containers: Vec<ContainerDeclaration>,
}

/// One declared container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContainerDeclaration {
    pub name: String,
    /// Image alias, e.g. `ubuntu/24.04`. Falls back to the project default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub privileged: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    /// Provisioners run in order against the running container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provisioning: Vec<Provisioner>,
}

impl ContainerDeclaration {
    /// Declaration with only a name set; everything else defaulted.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            image: None,
            privileged: false,
            environment: BTreeMap::new(),
            provisioning: Vec::new(),
        }
    }
}

/// A provisioning step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Provisioner {
    /// Run a shell command or script inside the container.
    Shell(ShellProvisioner),
}

/// Shell provisioner: exactly one of `inline` or `script` must be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShellProvisioner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<String>,
    /// Path to a script on the host, relative to the project file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}
