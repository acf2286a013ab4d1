//! nomad - orchestrate and run multiple containers using LXD

use std::process::ExitCode;

use clap::Parser;
use nomad_cli::cli::Cli;
use nomad_cli::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.is_json();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json {
                let code = nomad_cli::error_code(&e);
                match format_error(&format!("{e:#}"), code) {
                    Ok(obj) => println!("{obj}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
