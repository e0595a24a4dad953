// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          GitopsError (~24 bytes)
//!                  |
//!   +------+-------+-------+------+
//!   |      |       |       |      |
//!   v      v       v       v      v
//!  Git  Process  Config   Fs     Io
//!  Box    Box     Box    Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Git     NoWorkingCopy, UnsafeDeletion, InvalidLocator,
//!           InvalidNamePrefix, NotAGitUrl
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit,
//!           Terminated, Timeout
//!   Config  ParseError, MissingKey, InvalidValue
//!   Fs      NotFound, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GitopsError`].
pub type GitopsResult<T> = std::result::Result<T, GitopsError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum GitopsError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl GitopsError {
    /// Returns the git sub-error, if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if a command ran to completion but reported failure.
    ///
    /// Spawn failures, timeouts and signals are not exit statuses.
    #[must_use]
    pub fn is_non_zero_exit(&self) -> bool {
        matches!(self.as_process(), Some(ProcessError::NonZeroExit { .. }))
    }

    /// Returns the process sub-error, if this is one.
    #[must_use]
    pub fn as_process(&self) -> Option<&ProcessError> {
        match self {
            Self::Process(err) => Some(err),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GitopsError {
                fn from(err: $error) -> Self {
                    GitopsError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ProcessError => Process,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Operation requires a cloned working copy but none is bound.
    #[error("cannot {operation}: no working copy has been cloned")]
    NoWorkingCopy { operation: &'static str },

    /// Refused to delete a path outside the temporary root.
    #[error("refusing to delete '{path}': not inside temporary root '{root}'")]
    UnsafeDeletion { path: String, root: String },

    /// Repository name could not be extracted from the locator.
    #[error("cannot determine repository name from '{locator}'")]
    InvalidLocator { locator: String },

    /// Clone directory prefix would escape the temporary root.
    #[error("invalid clone directory prefix '{prefix}': must be a plain file name")]
    InvalidNamePrefix { prefix: String },

    /// Locator is not a recognised git URL.
    #[error("not a git URL: '{locator}'")]
    NotAGitUrl { locator: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}: {message}")]
    NonZeroExit {
        command: String,
        code: i32,
        message: String,
    },

    /// Process was terminated by a signal.
    #[error("process '{command}' terminated without an exit code")]
    Terminated { command: String },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
