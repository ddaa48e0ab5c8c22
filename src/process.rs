//! Subprocess execution with timeouts and output capture
//!
//! Commands are shell command lines (the composer invocation may be an
//! interpreter plus a phar path), run in a given working directory with a
//! hard deadline. Output is always captured for diagnostics; it is forwarded
//! line by line when streaming is requested, and on a real terminal a
//! streaming run inherits stdio so composer's progress bars render.

use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{ComposeError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of one subprocess run
#[derive(Debug)]
pub struct ProcessOutput {
    /// Whether the subprocess terminated with exit code 0
    pub success: bool,
    /// Exit code, if the subprocess terminated normally
    pub exit_code: Option<i32>,
    /// Combined stdout/stderr, empty when stdio was inherited
    pub output: String,
}

/// Runs shell command lines with the invocation-wide verbosity flags applied
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    quiet: bool,
    no_ansi: bool,
}

impl ProcessRunner {
    pub fn new(quiet: bool, no_ansi: bool) -> Self {
        Self { quiet, no_ansi }
    }

    /// Run `command_line` in `working_dir` (current directory when `None`),
    /// killing the subprocess once `timeout_secs` elapses.
    ///
    /// A nonzero exit is not an error at this level; the caller owns the
    /// step-specific diagnostic and reads `success` to decide.
    pub fn run(
        &self,
        command_line: &str,
        working_dir: Option<&Path>,
        timeout_secs: u64,
        stream: bool,
    ) -> Result<ProcessOutput> {
        let full = self.full_command_line(command_line);
        let cwd = match working_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };

        // Interactive mode only makes sense when the operator asked to see
        // the output and there is a terminal to attach to.
        let interactive = stream && std::io::stdout().is_terminal();

        let mut command = shell_command(&full);
        command.current_dir(&cwd);
        if interactive {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }

        let mut child = command.spawn().map_err(|e| ComposeError::SpawnFailed {
            command: full.clone(),
            reason: e.to_string(),
        })?;

        let stdout_drain = child.stdout.take().map(|out| drain_lines(out, stream));
        let stderr_drain = child.stderr.take().map(|err| drain_lines(err, stream));

        let status = self.wait_with_deadline(&mut child, &full, timeout_secs)?;

        let mut output = String::new();
        for drain in [stdout_drain, stderr_drain].into_iter().flatten() {
            if let Ok(captured) = drain.join() {
                output.push_str(&captured);
            }
        }

        Ok(ProcessOutput {
            success: status.success(),
            exit_code: status.code(),
            output,
        })
    }

    /// Append the verbosity flags so nested tooling matches the outer
    /// invocation.
    pub(crate) fn full_command_line(&self, command_line: &str) -> String {
        let mut full = command_line.to_string();
        if self.no_ansi {
            full.push_str(" --no-ansi");
        }
        if self.quiet {
            full.push_str(" --quiet");
        }
        full
    }

    fn wait_with_deadline(
        &self,
        child: &mut Child,
        command: &str,
        timeout_secs: u64,
    ) -> Result<ExitStatus> {
        let deadline = Instant::now() + Duration::from_secs(timeout_secs);
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ComposeError::SubprocessTimedOut {
                    command: command.to_string(),
                    timeout_secs,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Drain a pipe line by line, forwarding each line when streaming and
/// returning the captured text once the pipe closes.
fn drain_lines<R>(reader: R, stream: bool) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut captured = String::new();
        for line in BufReader::new(reader).lines().map_while(|l| l.ok()) {
            if stream {
                println!("{line}");
            }
            captured.push_str(&line);
            captured.push('\n');
        }
        captured
    })
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

/// Quote a path for inclusion in a shell command line
pub fn quoted(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

/// Path the composer invocation resolves against when a local phar exists
pub fn local_phar_path(cwd: &Path) -> PathBuf {
    cwd.join("composer.phar")
}
