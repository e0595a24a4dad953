// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External command execution seam.
//!
//! ```text
//! GitClient --> &dyn Executor
//!                  |
//!        +---------+----------+
//!        v                    v
//!  ShellExecutor       RecordingExecutor
//!  std::process         records every
//!  optional timeout     CommandInvocation,
//!  env overrides        scripted outcomes
//! ```
//!
//! One call issues exactly one command. No retries.

mod invocation;
pub mod recording;
pub mod shell;

pub use invocation::CommandInvocation;
pub use recording::{RecordingExecutor, ScriptedOutcome};
pub use shell::ShellExecutor;

use crate::error::GitopsResult;

/// Capability to run one external command synchronously.
pub trait Executor {
    /// Run `invocation` to completion.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::NonZeroExit` if the command ran but reported
    /// failure, and other `ProcessError` variants if it could not be run at all.
    fn exec(&self, invocation: &CommandInvocation) -> GitopsResult<()>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn exec(&self, invocation: &CommandInvocation) -> GitopsResult<()> {
        (**self).exec(invocation)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn exec(&self, invocation: &CommandInvocation) -> GitopsResult<()> {
        (**self).exec(invocation)
    }
}

impl<E: Executor + ?Sized> Executor for std::sync::Arc<E> {
    fn exec(&self, invocation: &CommandInvocation) -> GitopsResult<()> {
        (**self).exec(invocation)
    }
}
