//! Container registry and name resolution.
//!
//! The registry is built once per invocation from a validated `Project` and
//! is read-only afterwards. Resolution borrows handles from it.

use std::collections::HashMap;

use crate::domain::container::ContainerHandle;
use crate::domain::error::OrchestrationError;
use crate::domain::project::Project;

/// Declared containers, in declaration order, with name lookup.
#[derive(Debug)]
pub struct Registry {
    handles: Vec<ContainerHandle>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build the registry for a validated project.
    #[must_use]
    pub fn new(project: &Project) -> Self {
        let handles: Vec<ContainerHandle> = project
            .containers
            .iter()
            .map(|decl| ContainerHandle::new(&project.name, decl.clone()))
            .collect();
        let index = handles
            .iter()
            .enumerate()
            .map(|(i, h)| (h.name().to_string(), i))
            .collect();
        Self { handles, index }
    }

    /// Look up a handle by declared name.
    ///
    /// # Errors
    ///
    /// Returns `OrchestrationError::NotFound` if no container has that name.
    pub fn get(&self, name: &str) -> Result<&ContainerHandle, OrchestrationError> {
        self.index
            .get(name)
            .map(|&i| &self.handles[i])
            .ok_or_else(|| OrchestrationError::NotFound(name.to_string()))
    }

    /// Every handle in declaration order.
    #[must_use]
    pub fn all(&self) -> &[ContainerHandle] {
        &self.handles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Ordered, immutable selection of registry handles.
#[derive(Debug, Clone)]
pub struct ResolvedTargetSet<'r> {
    handles: Vec<&'r ContainerHandle>,
}

impl<'r> ResolvedTargetSet<'r> {
    #[must_use]
    pub fn handles(&self) -> &[&'r ContainerHandle] {
        &self.handles
    }

    pub fn iter(&self) -> impl Iterator<Item = &'r ContainerHandle> + '_ {
        self.handles.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'r str> {
        self.handles.iter().map(|h| h.name()).collect()
    }
}

/// Resolve requested names against the registry.
///
/// An empty request selects every declared container in declaration order;
/// otherwise the caller's order is kept. Duplicated names are kept as given.
///
/// # Errors
///
/// Returns `OrchestrationError::UnknownContainer` for the first name that is
/// not declared. No partial set is ever returned.
pub fn resolve<'r, S: AsRef<str>>(
    requested: &[S],
    registry: &'r Registry,
) -> Result<ResolvedTargetSet<'r>, OrchestrationError> {
    if requested.is_empty() {
        return Ok(ResolvedTargetSet {
            handles: registry.all().iter().collect(),
        });
    }
    let handles = requested
        .iter()
        .map(|name| {
            let name = name.as_ref();
            registry
                .get(name)
                .map_err(|_| OrchestrationError::UnknownContainer(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResolvedTargetSet { handles })
}
