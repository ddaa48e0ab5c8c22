//! Compose - Laravel application scaffolder
//!
//! Provisions a new Laravel application via composer, applies sane
//! per-project defaults to the environment file, and prepares the project
//! for its first run.

use std::io::IsTerminal;

use clap::Parser;
use inquire::Confirm;

mod cli;
mod common;
mod context;
mod editor;
mod error;
mod pipeline;
mod process;
mod ui;

use cli::Cli;
use context::InstallContext;
use error::{ComposeError, Result};
use pipeline::Pipeline;
use ui::Reporter;

fn prompt_confirm(message: &str) -> Result<bool> {
    // Non-interactive runs resolve the prompt to its default answer.
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }

    Confirm::new(message)
        .with_default(false)
        .with_help_message("Press 'y' to replace the directory, Enter to cancel")
        .prompt()
        .map_err(|e| ComposeError::PromptFailed {
            reason: e.to_string(),
        })
}

fn run(cli: &Cli) -> Result<()> {
    let reporter = Reporter::new(cli.quiet);
    reporter.banner();

    let ctx = InstallContext::from(cli);
    let pipeline = Pipeline::new(ctx, Box::new(prompt_confirm))?;
    pipeline.run()?;

    reporter.success("Application ready! Build something amazing!");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if cli.no_ansi {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // All aborts funnel through here; steps never exit the process themselves.
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
