// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Real process execution.
//!
//! ```text
//! exec(invocation)
//!        |
//!        v
//!   which(program) --> ExecutableNotFound
//!        |
//!        v
//!   spawn: args, cwd, env, piped stdio
//!      /          \
//!  no timeout    timeout
//!  output()      drain threads + try_wait poll, kill on deadline
//!        \          /
//!         v        v
//!     exit status check --> NonZeroExit / Terminated
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, trace};

use super::{CommandInvocation, Executor};
use crate::error::{GitopsResult, ProcessError};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Executor that spawns real processes.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    timeout: Option<Duration>,
    envs: Vec<(String, String)>,
}

impl ShellExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor preconfigured for unattended git runs.
    ///
    /// Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so a
    /// missing credential fails instead of blocking on a prompt.
    #[must_use]
    pub fn for_git() -> Self {
        Self::new()
            .with_env("GCM_INTERACTIVE", "never")
            .with_env("GIT_TERMINAL_PROMPT", "0")
    }

    /// Kill any command still running after `timeout`.
    ///
    /// Only the direct child is killed. A grandchild such as `ssh` or a
    /// `git-remote-*` helper may outlive it and keep the output pipes open;
    /// `exec` still returns at the deadline and the pipe readers finish once
    /// that grandchild exits.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn maybe_with_timeout(self, timeout: Option<Duration>) -> Self {
        match timeout {
            Some(t) => self.with_timeout(t),
            None => self,
        }
    }

    /// Adds an environment variable for every spawned command.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub fn envs(&self) -> &[(String, String)] {
        &self.envs
    }

    fn resolve(program: &str) -> GitopsResult<PathBuf> {
        which::which(program).map_err(|_| {
            ProcessError::ExecutableNotFound {
                name: program.to_string(),
            }
            .into()
        })
    }

    fn build_command(&self, path: PathBuf, invocation: &CommandInvocation) -> Command {
        let mut command = Command::new(path);
        command
            .args(invocation.args())
            .current_dir(invocation.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.envs {
            command.env(key, value);
        }
        command
    }

    fn wait_with_deadline(
        mut child: Child,
        timeout: Duration,
        cmd_line: &str,
    ) -> GitopsResult<Output> {
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + timeout;
        let status: ExitStatus = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    // Already-exited races are harmless here.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::Timeout {
                        command: cmd_line.to_string(),
                        timeout_secs: timeout.as_secs(),
                    }
                    .into());
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    return Err(ProcessError::SpawnFailed {
                        command: cmd_line.to_string(),
                        source,
                    }
                    .into());
                }
            }
        };

        Ok(Output {
            status,
            stdout: stdout.map(join_drain).unwrap_or_default(),
            stderr: stderr.map(join_drain).unwrap_or_default(),
        })
    }

    fn check_status(output: &Output, cmd_line: &str) -> GitopsResult<()> {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            trace!(stdout = %stdout.trim(), "stdout");
        }

        match output.status.code() {
            Some(0) => Ok(()),
            Some(code) => {
                let message = if stderr.trim().is_empty() {
                    stdout.trim().to_string()
                } else {
                    stderr.trim().to_string()
                };
                debug!(cmd = %cmd_line, code, "non-zero exit");
                Err(ProcessError::NonZeroExit {
                    command: cmd_line.to_string(),
                    code,
                    message,
                }
                .into())
            }
            None => {
                error!(cmd = %cmd_line, "terminated by signal");
                Err(ProcessError::Terminated {
                    command: cmd_line.to_string(),
                }
                .into())
            }
        }
    }
}

impl Executor for ShellExecutor {
    fn exec(&self, invocation: &CommandInvocation) -> GitopsResult<()> {
        let cmd_line = invocation.command_line();
        debug!(cwd = %invocation.working_dir().display(), "cd");
        debug!(cmd = %cmd_line, "exec");

        let path = Self::resolve(invocation.program())?;
        let mut command = self.build_command(path, invocation);

        let output = match self.timeout {
            None => command.output().map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?,
            Some(timeout) => {
                let child = command.spawn().map_err(|source| ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source,
                })?;
                trace!(pid = child.id(), "spawned");
                Self::wait_with_deadline(child, timeout, &cmd_line)?
            }
        };

        Self::check_status(&output, &cmd_line)
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn join_drain(handle: thread::JoinHandle<Vec<u8>>) -> Vec<u8> {
    handle.join().unwrap_or_default()
}
