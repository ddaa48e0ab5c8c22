//! Console output for the installer
//!
//! All user-facing lines go through [`Reporter`] so quiet mode silences them
//! in one place. Colors are handled by `console`; `--no-ansi` disables them
//! globally in `main`.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BANNER: &str = r"
  ___ ___  _ __ ___  _ __   ___  ___  ___
 / __/ _ \| '_ ` _ \| '_ \ / _ \/ __|/ _ \
| (_| (_) | | | | | | |_) | (_) \__ \  __/
 \___\___/|_| |_| |_| .__/ \___/|___/\___|
                    |_|
";

/// Quiet-aware console reporter
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print the startup banner
    pub fn banner(&self) {
        if !self.quiet {
            println!("{}", Style::new().red().apply_to(BANNER));
        }
    }

    /// Print a section headline with an underline
    pub fn headline(&self, text: &str) {
        if !self.quiet {
            let style = Style::new().green();
            println!("{}", style.apply_to(text));
            println!("{}", style.apply_to("===================================="));
        }
    }

    /// Print a `==>` step line
    pub fn step(&self, text: &str) {
        if !self.quiet {
            println!("{} {}", Style::new().cyan().bold().apply_to("==>"), text);
        }
    }

    /// Print a warning to stderr; warnings are shown even in quiet mode
    pub fn warn(&self, text: &str) {
        eprintln!("{} {}", Style::new().yellow().bold().apply_to("warning:"), text);
    }

    /// Print the final success message
    pub fn success(&self, text: &str) {
        if !self.quiet {
            println!("\n{}", Style::new().green().bold().apply_to(text));
        }
    }

    /// Show a spinner while a subprocess runs; `None` in quiet mode.
    ///
    /// The spinner ticks on its own thread, so the caller can block on the
    /// subprocess and `finish_and_clear` afterwards.
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}
