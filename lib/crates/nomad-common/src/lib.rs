pub mod project;
pub mod types;

pub use project::{ContainerDeclaration, ProjectFile, Provisioner, ShellProvisioner};
pub use types::*;
