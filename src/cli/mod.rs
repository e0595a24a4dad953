// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitops-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitops [global options] <command>
//! version
//! options [--json]
//! sources
//! repo-name <LOCATOR>
//! check-url <LOCATOR>
//! publish --url <LOCATOR> [--branch B] [-m MSG] <SOURCE>...
//! ```

pub mod global;
pub mod repo;


use crate::cli::global::GlobalOptions;
use crate::cli::repo::{CheckUrlArgs, OptionsArgs, PublishArgs, RepoNameArgs};
use clap::{Parser, Subcommand};

/// Git repository client for GitOps workflows.
#[derive(Debug, Parser)]
#[command(
    name = "gitops",
    author,
    version,
    about = "Git repository client for GitOps workflows",
    long_about = "gitops-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Clones a branch into an ephemeral working copy, commits\n\
                  changes with an explicit identity and pushes them back.",
    after_help = "CONFIGURATION:\n\n\
                  gitops reads `gitops.toml` from the current directory if it\n\
                  exists, then every file given with --config, then GITOPS_*\n\
                  environment variables (GITOPS_GIT__TEMP_ROOT, ...), then --set.\n\
                  Use --no-default-config to skip `gitops.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options(OptionsArgs),

    /// Lists the configuration sources that were loaded.
    Sources,

    /// Prints the repository name of a locator.
    #[command(name = "repo-name")]
    RepoName(RepoNameArgs),

    /// Checks whether a string is a git URL.
    #[command(name = "check-url")]
    CheckUrl(CheckUrlArgs),

    /// Clones a branch, copies files into it, commits and pushes.
    Publish(PublishArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
