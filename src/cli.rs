//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};

/// Compose - Laravel application scaffolder
///
/// Provision a new Laravel application skeleton with sane per-project defaults.
#[derive(Parser, Debug)]
#[command(
    name = "compose",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Scaffold a new Laravel application",
    long_about = "Compose provisions a new Laravel application via composer, applies sane \
                  per-project defaults to the environment file, and prepares the project \
                  for its first run.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  compose my-app\n    \
                  compose my-app --dev\n    \
                  compose . --force\n    \
                  compose my-app --quiet --no-ansi\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/laravelhub/compose"
)]
pub struct Cli {
    /// Directory name to install into, or "." for the current directory
    pub name: String,

    /// Install the latest development release instead of the latest stable
    #[arg(long)]
    pub dev: bool,

    /// Replace an existing directory without prompting
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Suppress output; also forwarded to every composer invocation
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Disable colored output; also forwarded to every composer invocation
    #[arg(long = "no-ansi")]
    pub no_ansi: bool,
}
