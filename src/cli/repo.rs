// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command arguments.
//!
//! ```text
//! repo-name LOCATOR   → print "eksctl" for git@github.com:weaveworks/eksctl.git
//! check-url LOCATOR   → exit 0 if LOCATOR is a git URL
//! publish -u LOCATOR SOURCE...
//!   → clone, copy SOURCEs into working copy, add, commit, push, delete
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `options` command.
#[derive(Debug, Clone, Args)]
pub struct OptionsArgs {
    /// Print the effective configuration as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `repo-name` command.
#[derive(Debug, Clone, Args)]
pub struct RepoNameArgs {
    /// Repository locator, e.g. `git@github.com:org/repo.git`.
    #[arg(value_name = "LOCATOR")]
    pub locator: String,
}

/// Arguments for the `check-url` command.
#[derive(Debug, Clone, Args)]
pub struct CheckUrlArgs {
    /// String to classify.
    #[arg(value_name = "LOCATOR")]
    pub locator: String,

    /// Print nothing, only set the exit status.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Arguments for the `publish` command.
#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    /// Repository to publish to.
    #[arg(short = 'u', long = "url", value_name = "LOCATOR")]
    pub url: String,

    /// Branch to clone and push, defaults to `git.branch`.
    #[arg(short = 'b', long)]
    pub branch: Option<String>,

    /// Commit message.
    #[arg(short = 'm', long, default_value = "Update from gitops")]
    pub message: String,

    /// Commit author name, defaults to `author.name`.
    #[arg(long = "name", value_name = "NAME")]
    pub author_name: Option<String>,

    /// Commit author email, defaults to `author.email`.
    #[arg(short = 'e', long = "email", value_name = "EMAIL")]
    pub author_email: Option<String>,

    /// Directory inside the repository to copy sources into.
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Commit but do not push.
    #[arg(long = "no-push")]
    pub no_push: bool,

    /// Keep the working copy instead of deleting it.
    #[arg(long)]
    pub keep: bool,

    /// Files or directories to copy into the working copy.
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,
}
