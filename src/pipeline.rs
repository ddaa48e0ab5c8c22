//! The provisioning pipeline
//!
//! An ordered sequence of fallible steps over a shared [`InstallContext`].
//! Each step mutates the context or touches the file system, and the first
//! error aborts the run; the driver in `main` turns that error into the
//! process exit, so no step terminates the process itself. The overwrite
//! confirmation is injected as a closure so tests can script the answer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::string_utils::{database_name, title_case_words};
use crate::context::{DEV_CHANNEL_CONSTRAINT, InstallContext};
use crate::editor;
use crate::error::{ComposeError, Result};
use crate::process::{ProcessRunner, local_phar_path, quoted};
use crate::ui::Reporter;

const CREATE_PROJECT_TIMEOUT_SECS: u64 = 120;
const INSTALL_TIMEOUT_SECS: u64 = 300;
const KEY_GENERATE_TIMEOUT_SECS: u64 = 60;

const OVERWRITE_PROMPT: &str =
    "Application/directory already exists, do you want to override the directory?";

/// Capability for asking the operator a yes/no question
pub type ConfirmFn<'a> = Box<dyn FnMut(&str) -> Result<bool> + 'a>;

/// Ordered provisioning steps over a shared installation context
pub struct Pipeline<'a> {
    ctx: InstallContext,
    confirm: ConfirmFn<'a>,
    runner: ProcessRunner,
    reporter: Reporter,
    /// Working directory captured once at construction; target resolution and
    /// the composer probe both read this instead of asking the OS again.
    working_dir: PathBuf,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: InstallContext, confirm: ConfirmFn<'a>) -> Result<Self> {
        let working_dir = std::env::current_dir()?;
        Ok(Self::with_working_dir(ctx, confirm, working_dir))
    }

    fn with_working_dir(ctx: InstallContext, confirm: ConfirmFn<'a>, working_dir: PathBuf) -> Self {
        let runner = ProcessRunner::new(ctx.quiet, ctx.no_ansi);
        let reporter = Reporter::new(ctx.quiet);
        Self {
            ctx,
            confirm,
            runner,
            reporter,
            working_dir,
        }
    }

    /// Run every step in order, returning the final context on success.
    pub fn run(mut self) -> Result<InstallContext> {
        self.resolve_target_path()?;
        self.check_destination_safety()?;
        self.resolve_version_constraint()?;
        self.resolve_composer_command()?;
        self.create_project()?;
        self.install_dependencies()?;
        self.apply_env_defaults()?;
        self.activate_env_file()?;
        self.make_artisan_executable()?;
        self.generate_app_key()?;
        Ok(self.ctx)
    }

    /// Step 1: compute the absolute installation path, exactly once.
    fn resolve_target_path(&mut self) -> Result<()> {
        self.ctx.target_path = if self.ctx.installs_into_current_dir() {
            self.working_dir.clone()
        } else {
            self.working_dir.join(&self.ctx.app_name)
        };
        Ok(())
    }

    /// Step 2: refuse to clobber an existing destination without consent.
    ///
    /// Declining the prompt is the one abort that is a cancellation, not a
    /// failure; the destination is left untouched in that case.
    fn check_destination_safety(&mut self) -> Result<()> {
        if !self.destination_occupied() {
            return Ok(());
        }

        if !self.ctx.force && !(self.confirm)(OVERWRITE_PROMPT)? {
            return Err(ComposeError::UserCancelled);
        }

        let target = &self.ctx.target_path;
        if target.is_dir() {
            fs::remove_dir_all(target)?;
        } else {
            fs::remove_file(target)?;
        }
        Ok(())
    }

    /// Step 3: pick the version line; empty means latest stable.
    fn resolve_version_constraint(&mut self) -> Result<()> {
        self.ctx.version_constraint = if self.ctx.dev {
            DEV_CHANNEL_CONSTRAINT.to_string()
        } else {
            String::new()
        };
        Ok(())
    }

    /// Step 4: prefer a local composer.phar run through the interpreter, so
    /// a phar without execute bits still works; otherwise let the shell
    /// resolve the bare command.
    fn resolve_composer_command(&mut self) -> Result<()> {
        let phar = local_phar_path(&self.working_dir);
        self.ctx.composer_command = if phar.exists() {
            format!("php {}", quoted(&phar))
        } else {
            "composer".to_string()
        };
        Ok(())
    }

    /// Step 5: scaffold the skeleton. Dependency installation and scripts are
    /// deferred to the next steps, and VCS metadata is stripped.
    fn create_project(&mut self) -> Result<()> {
        self.reporter.headline("Crafting Your Application");
        self.reporter.step("Installing laravel/laravel");

        let mut command = format!(
            "{} create-project laravel/laravel {}",
            self.ctx.composer_command,
            quoted(&self.ctx.target_path)
        );
        if !self.ctx.version_constraint.is_empty() {
            command.push(' ');
            command.push_str(&self.ctx.version_constraint);
        }
        command.push_str(" --remove-vcs --prefer-dist --no-install --no-scripts");

        self.run_checked(&command, None, CREATE_PROJECT_TIMEOUT_SECS)
    }

    /// Step 6: install dependencies inside the new project.
    fn install_dependencies(&mut self) -> Result<()> {
        self.reporter.step("Installing composer dependencies");

        let command = format!("{} install", self.ctx.composer_command);
        let target = self.ctx.target_path.clone();
        self.run_checked(&command, Some(&target), INSTALL_TIMEOUT_SECS)
    }

    /// Step 7: point the example environment file at this project.
    ///
    /// Substitutions are literal; a skeleton that already lacks a marker is
    /// left alone rather than treated as an error.
    fn apply_env_defaults(&mut self) -> Result<()> {
        self.reporter.step("Updating .env file with defaults");

        let env_example = self.ctx.target_path.join(".env.example");
        let name = &self.ctx.app_name;

        editor::replace_in_file(
            "APP_NAME=Laravel",
            &format!("APP_NAME={}", title_case_words(name)),
            &env_example,
        )?;
        editor::replace_in_file(
            "APP_URL=http://localhost",
            &format!("APP_URL=http://{name}.test"),
            &env_example,
        )?;
        editor::replace_in_file("MAIL_MAILER=smtp", "MAIL_MAILER=log", &env_example)?;
        editor::replace_in_file(
            "DB_DATABASE=laravel",
            &format!("DB_DATABASE={}", database_name(name)),
            &env_example,
        )?;
        Ok(())
    }

    /// Step 8: activate the environment file.
    fn activate_env_file(&mut self) -> Result<()> {
        self.reporter.step("Copying .env.example to .env");

        editor::copy_file(
            self.ctx.target_path.join(".env.example"),
            self.ctx.target_path.join(".env"),
        )
    }

    /// Step 9: the generated entrypoint must be runnable.
    fn make_artisan_executable(&mut self) -> Result<()> {
        editor::set_executable(self.ctx.target_path.join("artisan"))
    }

    /// Step 10: generate the application key. Best-effort: a failure is
    /// surfaced as a warning, never as an abort.
    fn generate_app_key(&mut self) -> Result<()> {
        self.reporter.step("Generating app key");

        let command = "php artisan key:generate";
        let target = self.ctx.target_path.clone();
        let spinner = self.reporter.spinner("Generating application key");
        let result = self
            .runner
            .run(command, Some(&target), KEY_GENERATE_TIMEOUT_SECS, false);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match result {
            Ok(output) if output.success => {}
            Ok(_) => self
                .reporter
                .warn("Failed to generate the application key; run 'php artisan key:generate' manually"),
            Err(e) => self.reporter.warn(&format!(
                "Failed to generate the application key: {e}"
            )),
        }
        Ok(())
    }

    /// Run a subprocess with a spinner and turn a nonzero exit into the
    /// step's terminal error.
    fn run_checked(&mut self, command: &str, dir: Option<&Path>, timeout_secs: u64) -> Result<()> {
        let spinner = self.reporter.spinner("Running composer");
        let result = self.runner.run(command, dir, timeout_secs, false);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let output = result?;
        if output.success {
            Ok(())
        } else {
            Err(ComposeError::SubprocessFailed {
                command: command.to_string(),
                exit_code: output.exit_code,
                output: output.output,
            })
        }
    }

    /// An occupied destination is an existing file or directory that is not
    /// the working directory itself (installing into "." must not trip the
    /// overwrite guard).
    fn destination_occupied(&self) -> bool {
        let target = &self.ctx.target_path;
        (target.is_dir() || target.is_file()) && *target != self.working_dir
    }
}
