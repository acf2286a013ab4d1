//! Shared test helpers: exit statuses, process outputs and project builders.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use nomad_cli::domain::{Project, Registry};
use nomad_common::ContainerDeclaration;

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Projects ─────────────────────────────────────────────────────────────────

/// A validated-looking project named `shop` declaring `names` in order.
pub fn project(names: &[&str]) -> Project {
    Project {
        name: "shop".to_string(),
        path: PathBuf::from("/srv/shop/nomad.yml"),
        default_image: Some("ubuntu/24.04".to_string()),
        containers: names
            .iter()
            .map(|n| ContainerDeclaration {
                image: Some("ubuntu/24.04".to_string()),
                ..ContainerDeclaration::named(n)
            })
            .collect(),
    }
}

pub fn registry(names: &[&str]) -> Registry {
    Registry::new(&project(names))
}

/// Hypervisor instance name for a container of the `shop` project.
pub fn inst(name: &str) -> String {
    format!("shop-{name}")
}
