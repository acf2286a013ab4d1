//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod container;
pub mod error;
pub mod outcome;
pub mod project;
pub mod registry;

pub use container::{ContainerHandle, instance_name, validate_name};
pub use error::{OrchestrationError, ProjectError};
pub use outcome::{OperationOutcome, Outcome, Verb, any_failed};
pub use project::{Project, validate_project};
pub use registry::{Registry, ResolvedTargetSet, resolve};
