//! nomad CLI library: exposes modules for integration testing.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod app;
pub mod application;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod output;

use crate::domain::{OrchestrationError, ProjectError};

/// Machine-readable code for an error escaping a command.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<OrchestrationError>() {
        e.code()
    } else if let Some(e) = err.downcast_ref::<ProjectError>() {
        e.code()
    } else {
        "ERROR"
    }
}
