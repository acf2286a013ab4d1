//! Infrastructure implementation of the `ProjectSource` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nomad_common::ProjectFile;

use crate::application::ports::ProjectSource;
use crate::domain::{Project, ProjectError, validate_project};

/// File names looked up in each directory, in order.
pub const PROJECT_FILE_NAMES: [&str; 2] = ["nomad.yml", ".nomad.yml"];

/// Reads `nomad.yml` from disk.
///
/// With an explicit path (from `--file` or `NOMAD_FILE`) that file is used;
/// otherwise the search walks from `start` up to the filesystem root.
pub struct YamlProjectSource {
    explicit: Option<PathBuf>,
    start: PathBuf,
}

impl YamlProjectSource {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>, start: PathBuf) -> Self {
        Self { explicit, start }
    }

    /// Source rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn from_cwd(explicit: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        Ok(Self::new(explicit, cwd))
    }
}

/// Walk from `start` to the root and return the first project file found.
///
/// # Errors
///
/// Returns `ProjectError::NotFound` when no directory holds a project file.
pub fn locate_from(start: &Path) -> Result<PathBuf, ProjectError> {
    start
        .ancestors()
        .flat_map(|dir| PROJECT_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ProjectError::NotFound(start.to_path_buf()))
}

/// Parse and validate project file contents.
///
/// # Errors
///
/// `ProjectError::Parse` for malformed YAML or unknown keys, otherwise the
/// first validation error.
pub fn parse_project(content: &str, path: &Path) -> Result<Project, ProjectError> {
    let file: ProjectFile = serde_yaml::from_str(content).map_err(|e| ProjectError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    validate_project(file, path)
}

impl ProjectSource for YamlProjectSource {
    fn locate(&self) -> Result<PathBuf> {
        match &self.explicit {
            Some(path) if path.is_absolute() => Ok(path.clone()),
            Some(path) => Ok(self.start.join(path)),
            None => Ok(locate_from(&self.start)?),
        }
    }

    fn load(&self) -> Result<Project> {
        let path = self.locate()?;
        tracing::debug!(path = %path.display(), "loading project file");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Ok(parse_project(&content, &path)?)
    }
}
