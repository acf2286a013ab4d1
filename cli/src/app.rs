//! Application context: unified state passed to every command handler.
//!
//! The project source and the hypervisor adapter are built once here and
//! borrowed by the commands; nothing is lazily memoized elsewhere.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfirmationPrompt;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::lxc::LxcHypervisor;
use crate::infra::project::YamlProjectSource;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `NOMAD_YES` env vars).
    pub yes: bool,
    /// Explicit project file (`--file` / `NOMAD_FILE`).
    pub file: Option<PathBuf>,
    /// Containers processed concurrently.
    pub jobs: usize,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Whether the environment asks for non-interactive behaviour.
fn ci_env() -> bool {
    std::env::var_os("CI").is_some() || std::env::var_os("NOMAD_YES").is_some()
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// LXD hypervisor adapter.
    pub hypervisor: LxcHypervisor<TokioCommandRunner>,
    /// Where `nomad.yml` is read from.
    pub project_source: YamlProjectSource,
    /// When `true`, never prompt; confirmations answer "no".
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `NOMAD_YES`
    /// environment variables are present.
    pub non_interactive: bool,
    /// Containers processed concurrently by lifecycle verbs.
    pub jobs: usize,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let non_interactive = flags.behaviour.yes || ci_env();

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        // stdout carries only the JSON document in JSON mode
        let quiet = flags.output.quiet || mode == OutputMode::Json;

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            hypervisor: LxcHypervisor::default_runner(),
            project_source: YamlProjectSource::from_cwd(flags.behaviour.file)?,
            non_interactive,
            jobs: flags.behaviour.jobs.max(1),
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter writing through this context's output.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

impl ConfirmationPrompt for AppContext {
    /// Ask the user for confirmation, defaulting to "no".
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `NOMAD_YES` env),
    /// returns `false` immediately without prompting.
    fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.non_interactive {
            tracing::debug!(prompt, "non-interactive, answering no");
            return Ok(false);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}
