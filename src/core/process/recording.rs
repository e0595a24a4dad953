// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recording test double for [`Executor`].
//!
//! ```text
//! exec(invocation)
//!    | record
//!    v
//! outcome = queued (FIFO) | rule for subcommand | default
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CommandInvocation, Executor};
use crate::error::{GitopsResult, ProcessError};

/// Result a [`RecordingExecutor`] hands back for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScriptedOutcome {
    /// Command exits with status 0.
    #[default]
    Success,
    /// Command runs and exits with the given code and stderr.
    Exit { code: i32, stderr: String },
    /// Command cannot be started at all.
    SpawnFailure(String),
}

impl ScriptedOutcome {
    /// Non-zero exit with empty diagnostic output.
    #[must_use]
    pub const fn exit(code: i32) -> Self {
        Self::Exit {
            code,
            stderr: String::new(),
        }
    }

    fn into_result(self, invocation: &CommandInvocation) -> GitopsResult<()> {
        match self {
            Self::Success | Self::Exit { code: 0, .. } => Ok(()),
            Self::Exit { code, stderr } => Err(ProcessError::NonZeroExit {
                command: invocation.command_line(),
                code,
                message: stderr,
            }
            .into()),
            Self::SpawnFailure(message) => Err(ProcessError::SpawnFailed {
                command: invocation.command_line(),
                source: std::io::Error::other(message),
            }
            .into()),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<CommandInvocation>,
    queued: VecDeque<ScriptedOutcome>,
    rules: BTreeMap<String, ScriptedOutcome>,
    default: ScriptedOutcome,
}

/// Executor that stores every invocation and returns programmed outcomes.
///
/// Never spawns anything.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    state: Mutex<State>,
}

impl RecordingExecutor {
    /// Recorder where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder where every unmatched command gets `outcome`.
    #[must_use]
    pub fn with_default(outcome: ScriptedOutcome) -> Self {
        let recorder = Self::new();
        recorder.lock().default = outcome;
        recorder
    }

    /// Program the outcome for every command whose first argument is `subcommand`.
    #[must_use]
    pub fn on_subcommand(self, subcommand: &str, outcome: ScriptedOutcome) -> Self {
        self.lock().rules.insert(subcommand.to_string(), outcome);
        self
    }

    /// Queue an outcome for the next call, ahead of rules and the default.
    pub fn push_outcome(&self, outcome: ScriptedOutcome) {
        self.lock().queued.push_back(outcome);
    }

    /// All recorded invocations, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<CommandInvocation> {
        self.lock().calls.clone()
    }

    /// Argument vectors of all recorded invocations.
    #[must_use]
    pub fn recorded_args(&self) -> Vec<Vec<String>> {
        self.lock().calls.iter().map(|c| c.args().to_vec()).collect()
    }

    /// The most recent invocation.
    #[must_use]
    pub fn last_call(&self) -> Option<CommandInvocation> {
        self.lock().calls.last().cloned()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Forget recorded invocations, keep programmed outcomes.
    pub fn clear(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Executor for RecordingExecutor {
    fn exec(&self, invocation: &CommandInvocation) -> GitopsResult<()> {
        let outcome = {
            let mut state = self.lock();
            state.calls.push(invocation.clone());
            if let Some(outcome) = state.queued.pop_front() {
                outcome
            } else if let Some(outcome) = invocation
                .subcommand()
                .and_then(|sub| state.rules.get(sub))
            {
                outcome.clone()
            } else {
                state.default.clone()
            }
        };
        outcome.into_result(invocation)
    }
}
