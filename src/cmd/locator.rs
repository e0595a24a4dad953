// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locator inspection commands.

use crate::cli::repo::{CheckUrlArgs, RepoNameArgs};
use crate::error::Result;
use crate::git::{classify, repo_name};

/// Print the repository name of a locator.
///
/// # Errors
///
/// Returns `GitError::InvalidLocator` if no name can be extracted.
pub fn run_repo_name_command(args: &RepoNameArgs) -> Result<()> {
    let name = repo_name(&args.locator)?;
    println!("{name}");
    Ok(())
}

/// Report whether the argument is a git URL.
///
/// Returns `true` when it is, so the caller can turn it into the exit status.
#[must_use]
pub fn run_check_url_command(args: &CheckUrlArgs) -> bool {
    let kind = classify(&args.locator);
    if !args.quiet {
        match kind {
            Some(kind) => println!("{}: {kind} git URL", args.locator),
            None => println!("{}: not a git URL", args.locator),
        }
    }
    kind.is_some()
}
