//! External test runner invocation.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use scaffold_core::config::CoverageConfig;
use scaffold_core::errors::RunnerError;
use wait_timeout::ChildExt;

pub const TEST_FILE_PLACEHOLDER: &str = "{test_file}";
pub const SOURCE_FILE_PLACEHOLDER: &str = "{source_file}";

/// Runs one generated test file with coverage enabled.
pub trait TestRunner {
    /// Run `test_file`, collecting coverage for `source_file`.
    fn run(&self, test_file: &Path, source_file: &Path) -> Result<(), RunnerError>;
}

/// Runs a configured command line in the project root.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    command: Vec<String>,
    cwd: PathBuf,
    timeout: Option<Duration>,
    inherit_output: bool,
}

impl CommandRunner {
    pub fn new(command: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command,
            cwd: cwd.into(),
            timeout: None,
            inherit_output: false,
        }
    }

    pub fn from_config(config: &CoverageConfig, root: &Path) -> Self {
        Self {
            command: config.effective_command(),
            cwd: root.to_path_buf(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
            inherit_output: config.effective_inherit_output(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The argument vector for one file, placeholders substituted with
    /// root-relative, forward-slashed paths.
    pub fn arguments(&self, test_file: &Path, source_file: &Path) -> Vec<String> {
        let test = self.display_path(test_file);
        let source = self.display_path(source_file);
        self.command
            .iter()
            .map(|arg| {
                arg.replace(TEST_FILE_PLACEHOLDER, &test)
                    .replace(SOURCE_FILE_PLACEHOLDER, &source)
            })
            .collect()
    }

    fn display_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.cwd).unwrap_or(path);
        relative.to_string_lossy().replace('\\', "/")
    }
}

impl TestRunner for CommandRunner {
    fn run(&self, test_file: &Path, source_file: &Path) -> Result<(), RunnerError> {
        let args = self.arguments(test_file, source_file);
        let (program, rest) = args.split_first().ok_or(RunnerError::EmptyCommand)?;
        let command_line = args.join(" ");
        tracing::info!(command = %command_line, "running test runner");

        let (stdout, stderr) = if self.inherit_output {
            (Stdio::inherit(), Stdio::inherit())
        } else {
            (Stdio::null(), Stdio::null())
        };
        let mut child = Command::new(program)
            .args(rest)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        let status = match self.timeout {
            Some(timeout) => {
                let waited = child.wait_timeout(timeout).map_err(|source| RunnerError::Spawn {
                    command: command_line.clone(),
                    source,
                })?;
                match waited {
                    Some(status) => status,
                    None => {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(RunnerError::TimedOut {
                            command: command_line,
                            seconds: timeout.as_secs(),
                        });
                    }
                }
            }
            None => child.wait().map_err(|source| RunnerError::Spawn {
                command: command_line.clone(),
                source,
            })?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(RunnerError::NonZeroExit {
                command: command_line,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}
