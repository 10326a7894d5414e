//! The external execution collaborator behind `exec`-class directives.

use crate::error::{ConkyError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use super::command::{execute, CommandOptions};

/// Runs a command line synchronously and returns its standard output.
///
/// A slow command blocks the template evaluation that triggered it;
/// callers wanting a bound on wall-clock time enforce it here.
pub trait Executor: Send + Sync {
    /// Run `command_line` and return its raw stdout.
    fn run(&self, command_line: &str) -> Result<String>;
}

/// Executes commands through `/bin/sh -c`.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    options: CommandOptions,
}

impl ShellExecutor {
    /// Create an executor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor with custom working directory and environment.
    pub fn with_options(options: CommandOptions) -> Self {
        Self { options }
    }
}

impl Executor for ShellExecutor {
    fn run(&self, command_line: &str) -> Result<String> {
        let result = execute(command_line, &self.options)?;
        if result.success {
            Ok(result.stdout)
        } else {
            let stderr = result.stderr.trim();
            if !stderr.is_empty() {
                tracing::debug!("`{}` wrote to stderr: {}", command_line, stderr);
            }
            Err(ConkyError::CommandFailed {
                command: command_line.to_string(),
                code: result.exit_code,
            })
        }
    }
}

/// Executor that returns canned output and records every invocation.
///
/// Commands without a canned response echo the command line back.
///
/// # Example
///
/// ```
/// use conkytext::shell::{Executor, RecordingExecutor};
///
/// let exec = RecordingExecutor::new();
/// exec.respond("date", "Mon\n");
/// assert_eq!(exec.run("date").unwrap(), "Mon\n");
/// assert_eq!(exec.calls(), vec!["date".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    responses: Mutex<HashMap<String, std::result::Result<String, i32>>>,
    calls: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    /// Create an executor with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `output` whenever `command` runs.
    pub fn respond(&self, command: &str, output: &str) {
        self.lock_responses()
            .insert(command.to_string(), Ok(output.to_string()));
    }

    /// Make `command` fail with exit code `code`.
    pub fn fail(&self, command: &str, code: i32) {
        self.lock_responses()
            .insert(command.to_string(), Err(code));
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of times `command` has run.
    pub fn count(&self, command: &str) -> usize {
        self.calls().iter().filter(|c| *c == command).count()
    }

    fn lock_responses(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, std::result::Result<String, i32>>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, command_line: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command_line.to_string());

        match self.lock_responses().get(command_line) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(code)) => Err(ConkyError::CommandFailed {
                command: command_line.to_string(),
                code: Some(*code),
            }),
            None => Ok(command_line.to_string()),
        }
    }
}
