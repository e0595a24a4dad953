// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitops-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitops.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GITOPS_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITOPS_GIT__TEMP_ROOT=/srv/tmp  → git.temp_root = "/srv/tmp"
//! GITOPS_GIT__BRANCH=dev          → git.branch = "dev"
//! GITOPS_AUTHOR__EMAIL=ci@x.org   → author.email = "ci@x.org"
//! ```
//!
//! # Example
//!
//! ```toml
//! [git]
//! temp_root = "/var/tmp/gitops"
//! clone_prefix = "flux-"
//! timeout_secs = 120
//!
//! [author]
//! name = "Flux"
//! email = "flux@example.com"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{AuthorConfig, GitConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git client settings.
    pub git: GitConfig,
    /// Commit identity.
    pub author: AuthorConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitops_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitops.toml")
    ///     .with_env_prefix("GITOPS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.git.validate()
    }

    /// Format configuration options for display.
    ///
    /// Keys are sorted; unset optional values print empty.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let opt = |p: Option<String>| p.unwrap_or_default();
        let options: BTreeMap<&str, String> = BTreeMap::from([
            (
                "global.output_log_level",
                self.global.output_log_level.as_u8().to_string(),
            ),
            (
                "global.file_log_level",
                self.global.file_log_level.as_u8().to_string(),
            ),
            (
                "global.log_file",
                opt(self.global.log_file.as_ref().map(|p| p.display().to_string())),
            ),
            ("git.program", self.git.program.clone()),
            ("git.temp_root", self.git.temp_root().display().to_string()),
            ("git.clone_prefix", self.git.clone_prefix.clone()),
            ("git.branch", self.git.branch.clone()),
            (
                "git.timeout_secs",
                opt(self.git.timeout_secs.map(|t| t.to_string())),
            ),
            ("author.name", self.author.name.clone()),
            ("author.email", self.author.email.clone()),
        ]);

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
