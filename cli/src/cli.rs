//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Orchestrate and run multiple containers using LXD
#[derive(Parser)]
#[command(
    name = "nomad",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also set by a `NO_COLOR` environment variable)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never prompt; destructive confirmations answer no
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Project file to use instead of searching for nomad.yml
    #[arg(long, global = true, env = "NOMAD_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Number of containers processed concurrently
    #[arg(long, global = true, env = "NOMAD_JOBS", default_value_t = 1, value_name = "N")]
    pub jobs: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create, start and provision containers
    Up(commands::up::UpArgs),

    /// Stop containers
    Halt(commands::TargetArgs),

    /// Stop and remove containers
    Destroy(commands::destroy::DestroyArgs),

    /// Provision running containers
    Provision(commands::TargetArgs),

    /// Show containers' statuses
    Status(commands::TargetArgs),

    /// Open a shell in a container
    Shell(commands::shell::ShellArgs),

    /// Validate and show the project file
    Config(commands::config::ConfigArgs),
}

impl Cli {
    /// Whether `--json` was requested; used to format errors escaping `run`.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be loaded, a requested name is
    /// not declared, or the hypervisor cannot be reached for a whole-command
    /// step. Per-container failures are reported and turned into exit code 1.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose,
            yes,
            file,
            jobs,
            command,
        } = self;
        crate::logging::init(verbose);

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, file, jobs },
        })?;

        match command {
            Command::Up(args) => commands::up::run(&app, &args).await,
            Command::Halt(args) => commands::halt::run(&app, &args).await,
            Command::Destroy(args) => commands::destroy::run(&app, &args).await,
            Command::Provision(args) => commands::provision::run(&app, &args).await,
            Command::Status(args) => commands::status::run(&app, &args).await,
            Command::Shell(args) => commands::shell::run(&app, &args).await,
            Command::Config(args) => commands::config::run(&app, &args),
        }
    }
}
