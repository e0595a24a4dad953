// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitops-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, GitConfig, AuthorConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::git::client::DEFAULT_PROGRAM;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for stdout output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Git client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Version-control program, resolved on PATH.
    pub program: String,
    /// Parent directory of all working copies. Defaults to the OS temp dir.
    pub temp_root: Option<PathBuf>,
    /// File name prefix of working copy directories.
    pub clone_prefix: String,
    /// Branch to clone when none is given.
    pub branch: String,
    /// Kill a git command still running after this many seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            temp_root: None,
            clone_prefix: "gitops-repo-".to_string(),
            branch: "main".to_string(),
            timeout_secs: None,
        }
    }
}

impl GitConfig {
    /// Effective temp root.
    #[must_use]
    pub fn temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check values the git client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty program, a clone prefix
    /// that is not a plain file name, an empty branch, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            section: "git".to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.program.trim().is_empty() {
            return Err(invalid("program", "must not be empty"));
        }
        if self.clone_prefix.contains(['/', '\\']) || self.clone_prefix.contains("..") {
            return Err(invalid(
                "clone_prefix",
                "must be a plain file name without separators",
            ));
        }
        if self.branch.trim().is_empty() {
            return Err(invalid("branch", "must not be empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Commit identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "gitops".to_string(),
            email: String::new(),
        }
    }
}

impl AuthorConfig {
    /// Returns the `(name, email)` pair, or an error naming the missing key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if name or email is empty.
    pub fn identity(&self) -> Result<(&str, &str), ConfigError> {
        let missing = |key: &str| ConfigError::MissingKey {
            section: "author".to_string(),
            key: key.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(missing("name"));
        }
        if self.email.trim().is_empty() {
            return Err(missing("email"));
        }
        Ok((&self.name, &self.email))
    }
}
