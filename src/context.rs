//! Shared installation state threaded through the pipeline

use std::path::PathBuf;

use crate::cli::Cli;

/// Name that means "install into the current directory"
pub const CURRENT_DIR_SENTINEL: &str = ".";

/// Version constraint selected by the --dev flag
pub const DEV_CHANNEL_CONSTRAINT: &str = "dev-develop";

/// The unit of work for one installation run.
///
/// Created once from the parsed CLI arguments, mutated in place by each
/// pipeline step, and dropped at process exit. `target_path` and
/// `composer_command` start empty and are filled in by their resolving steps;
/// every later step reads them instead of re-deriving them, so a mid-run
/// working directory change cannot make the steps disagree about paths.
#[derive(Debug, Clone)]
pub struct InstallContext {
    /// Raw user-supplied identifier, also used to derive environment defaults
    pub app_name: String,
    /// Absolute installation path, resolved exactly once
    pub target_path: PathBuf,
    /// Install from the development channel instead of latest stable
    pub dev: bool,
    /// Replace an existing destination without prompting
    pub force: bool,
    /// Forwarded to every subprocess invocation
    pub quiet: bool,
    /// Forwarded to every subprocess invocation
    pub no_ansi: bool,
    /// Version constraint passed to create-project; empty means latest stable
    pub version_constraint: String,
    /// Resolved composer invocation prefix (bare name or interpreter + phar)
    pub composer_command: String,
}

impl InstallContext {
    /// Whether the operator asked to install into the current directory
    pub fn installs_into_current_dir(&self) -> bool {
        self.app_name == CURRENT_DIR_SENTINEL
    }
}

impl From<&Cli> for InstallContext {
    fn from(cli: &Cli) -> Self {
        Self {
            app_name: cli.name.clone(),
            target_path: PathBuf::new(),
            dev: cli.dev,
            force: cli.force,
            quiet: cli.quiet,
            no_ansi: cli.no_ansi,
            version_constraint: String::new(),
            composer_command: String::new(),
        }
    }
}
