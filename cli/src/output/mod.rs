//! Output formatting module

pub mod human;
pub mod json;
pub mod reporter;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::domain::{OperationOutcome, Project, Verb};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }
}

/// Renderer selected by the output mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render the outcomes of one verb, in target order.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_outcomes(&self, verb: Verb, outcomes: &[OperationOutcome]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_outcomes(verb, outcomes);
                Ok(())
            }
            Self::Json(r) => r.render_outcomes(verb, outcomes),
        }
    }

    /// Render the validated project file, or only its container names.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, project: &Project, containers_only: bool) -> Result<()> {
        match self {
            Self::Human(r) => r.render_config(project, containers_only),
            Self::Json(r) => r.render_config(project, containers_only),
        }
    }
}
