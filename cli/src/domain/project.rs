//! Project validation: turns a parsed `nomad.yml` into a `Project`.
//!
//! Pure functions only: no I/O and no async.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use nomad_common::{ContainerDeclaration, ProjectFile, Provisioner};

use crate::domain::container::{MAX_INSTANCE_NAME, instance_name, validate_name};
use crate::domain::error::ProjectError;

/// A validated project: unique, well-formed names, every container has an
/// image, and provisioner script paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    /// Location of the project file this project was loaded from.
    pub path: PathBuf,
    pub default_image: Option<String>,
    /// Declarations in declaration order.
    pub containers: Vec<ContainerDeclaration>,
}

impl Project {
    /// Normalized project file, as shown by `nomad config`.
    #[must_use]
    pub fn as_file(&self) -> ProjectFile {
        ProjectFile {
            name: self.name.clone(),
            image: self.default_image.clone(),
            containers: self.containers.clone(),
        }
    }

    #[must_use]
    pub fn container_names(&self) -> Vec<&str> {
        self.containers.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Validate a parsed project file.
///
/// `path` is the location of the file; relative `script` paths are resolved
/// against its parent directory.
///
/// # Errors
///
/// Returns the first `ProjectError` found, checking the project name first
/// and then each container in declaration order.
pub fn validate_project(file: ProjectFile, path: &Path) -> Result<Project, ProjectError> {
    validate_name(&file.name)?;
    if file.containers.is_empty() {
        return Err(ProjectError::Empty);
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let mut seen = HashSet::new();
    let mut containers = Vec::with_capacity(file.containers.len());

    for mut decl in file.containers {
        validate_name(&decl.name)?;
        if !seen.insert(decl.name.clone()) {
            return Err(ProjectError::DuplicateName(decl.name));
        }
        let instance = instance_name(&file.name, &decl.name);
        if instance.len() > MAX_INSTANCE_NAME {
            return Err(ProjectError::NameTooLong(instance));
        }

        if decl.image.is_none() {
            decl.image.clone_from(&file.image);
        }
        if decl.image.is_none() {
            return Err(ProjectError::MissingImage(decl.name));
        }

        for (index, step) in decl.provisioning.iter_mut().enumerate() {
            let Provisioner::Shell(shell) = step;
            match (&shell.inline, &mut shell.script) {
                (Some(_), None) => {}
                (None, Some(script)) => {
                    *script = base.join(&*script).to_string_lossy().into_owned();
                }
                _ => {
                    return Err(ProjectError::InvalidProvisioner {
                        container: decl.name.clone(),
                        index: index + 1,
                    });
                }
            }
        }
        containers.push(decl);
    }

    Ok(Project {
        name: file.name,
        path: path.to_path_buf(),
        default_image: file.image,
        containers,
    })
}
