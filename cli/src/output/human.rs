//! Human-readable terminal renderer.

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;

use crate::domain::{OperationOutcome, Outcome, Project, Verb};
use crate::output::OutputContext;

/// Renders outcomes and project data as human-readable terminal output.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// One line per target, in target order. `status` renders a table.
    ///
    /// Failures always go to stderr; everything else honours `quiet`.
    pub fn render_outcomes(&self, verb: Verb, outcomes: &[OperationOutcome]) {
        if verb == Verb::Status {
            self.render_status(outcomes);
            return;
        }
        for op in outcomes {
            match &op.outcome {
                Outcome::Succeeded => self
                    .ctx
                    .success(&format!("{} {}", op.container, verb.done_label())),
                Outcome::Skipped(reason) => self.ctx.info(&format!("{}: {reason}", op.container)),
                Outcome::Failed(err) => self.ctx.error(&format!("{}: {err:#}", op.container)),
            }
        }
    }

    /// Status table. Rows are data, so `quiet` does not hide them.
    fn render_status(&self, outcomes: &[OperationOutcome]) {
        let width = outcomes
            .iter()
            .map(|op| op.container.len())
            .max()
            .unwrap_or(0);
        for op in outcomes {
            match (&op.outcome, op.status) {
                (Outcome::Failed(err), _) => {
                    self.ctx.error(&format!("{}: {err:#}", op.container));
                }
                (_, Some(status)) => println!(
                    "  {:<width$}  {}",
                    op.container,
                    status.to_string().style(self.ctx.styles.status(status))
                ),
                (_, None) => println!("  {:<width$}  ?", op.container),
            }
        }
    }

    /// Print the normalized project file as YAML, or one name per line.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn render_config(&self, project: &Project, containers_only: bool) -> Result<()> {
        if containers_only {
            for name in project.container_names() {
                println!("{name}");
            }
            return Ok(());
        }
        let yaml = serde_yaml::to_string(&project.as_file()).context("cannot serialize project")?;
        if !self.ctx.quiet {
            println!("# {}", project.path.display().style(self.ctx.styles.dim));
        }
        print!("{yaml}");
        Ok(())
    }
}
