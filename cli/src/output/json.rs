//! JSON output helpers.
//!
//! Provides the outcome report and project serializers used by `--json`, and
//! the error-object formatter used by every `--json` code path when a command
//! fails.

use anyhow::{Context, Result};
use nomad_common::{OutcomeRecord, OutcomeReport};

use crate::domain::{OperationOutcome, Project, Verb, any_failed};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Build the report printed for one verb.
#[must_use]
pub fn report(verb: Verb, outcomes: &[OperationOutcome]) -> OutcomeReport {
    OutcomeReport {
        verb: verb.to_string(),
        ok: !any_failed(outcomes),
        outcomes: outcomes.iter().map(OutcomeRecord::from).collect(),
    }
}

/// Renders outcomes and project data as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_outcomes(&self, verb: Verb, outcomes: &[OperationOutcome]) -> Result<()> {
        let out = serde_json::to_string_pretty(&report(verb, outcomes))
            .context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, project: &Project, containers_only: bool) -> Result<()> {
        let out = if containers_only {
            serde_json::to_string_pretty(&project.container_names())
        } else {
            serde_json::to_string_pretty(&project.as_file())
        }
        .context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }
}
