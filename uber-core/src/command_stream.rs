// Standard library
use std::fmt::{self, Display, Formatter};
use std::io::{BufRead, BufReader};

// External crates
use duct::cmd;
use tracing::debug;
use which::which;

use crate::error::{Result, UberError};

/// Exit status of an external command.
///
/// `code` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    code: Option<i32>,
}

impl ExitStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signalled() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl Display for ExitStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "signal"),
        }
    }
}

/// Runs a shell command line, handing every output line to a callback.
///
/// There is no timeout: the call blocks until the process exits. stdout and
/// stderr are merged in the order the process produced them.
pub trait ProcessRunner {
    fn run(&self, command_line: &str, on_line: &mut dyn FnMut(&str)) -> Result<ExitStatus>;
}

/// `ProcessRunner` backed by `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, command_line: &str, on_line: &mut dyn FnMut(&str)) -> Result<ExitStatus> {
        debug!(command = command_line, "running external command");

        let reader = cmd!("sh", "-c", command_line)
            .stderr_to_stdout()
            .unchecked()
            .reader()
            .map_err(|e| UberError::Command(format!("Failed to start '{}': {}", command_line, e)))?;

        for line in BufReader::new(&reader).lines() {
            on_line(&line?);
        }

        let status = match reader.try_wait()? {
            Some(output) => match output.status.code() {
                Some(code) => ExitStatus::from_code(code),
                None => ExitStatus::signalled(),
            },
            None => ExitStatus::signalled(),
        };
        debug!(command = command_line, status = %status, "external command finished");
        Ok(status)
    }
}

/// Safely escape a string for shell execution by wrapping in single quotes
/// and escaping any existing single quotes
pub fn shell_escape(arg: &str) -> String {
    if !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '/')
    {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\"'\"'"))
    }
}

/// Checks if a command-line tool is available in the system's PATH.
pub fn is_tool_installed(tool_name: &str) -> bool {
    which(tool_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("homestead"), "homestead");
        assert_eq!(shell_escape("/var/www/blog"), "/var/www/blog");
        assert_eq!(shell_escape("two words"), "'two words'");
        assert_eq!(shell_escape("it's"), "'it'\"'\"'s'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_exit_status() {
        assert!(ExitStatus::from_code(0).success());
        assert!(!ExitStatus::from_code(2).success());
        assert!(!ExitStatus::signalled().success());
        assert_eq!(ExitStatus::from_code(2).to_string(), "2");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_streams_lines_and_status() {
        let mut lines = Vec::new();
        let status = ShellRunner
            .run("printf 'one\\ntwo\\n'; echo three >&2; exit 3", &mut |line| {
                lines.push(line.to_string())
            })
            .unwrap();

        assert_eq!(status.code(), Some(3));
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_success() {
        let status = ShellRunner.run("true", &mut |_| {}).unwrap();
        assert!(status.success());
    }
}
