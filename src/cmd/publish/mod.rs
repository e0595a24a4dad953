// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command: the GitOps round trip for a set of local files.
//!
//! # Flow
//!
//! ```text
//! is_git_url(url)?  ── no ──> NotAGitUrl
//!        │
//! clone_repo("<clone_prefix><repo>-", branch, url)
//!        │
//! copy SOURCE... --> <working copy>/<dest>/
//!        │
//! add -- <relative paths>
//!        │
//! commit (no-op when nothing staged)
//!        │
//! push (unless --no-push)
//!        │
//! delete_local_repo (unless --keep, also after a failure)
//! ```

#[cfg(test)]
mod tests;

use crate::cli::repo::PublishArgs;
use crate::config::Config;
use crate::core::process::Executor;
use crate::error::{GitError, Result};
use crate::git::{GitClient, is_git_url, repo_name};
use crate::utility::fs::copy::copy_into;
use anyhow::{Context, bail};
use bon::Builder;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Everything needed for one publish run.
#[derive(Debug, Clone, Builder)]
pub struct PublishRequest {
    #[builder(into)]
    locator: String,
    #[builder(into)]
    branch: String,
    #[builder(into)]
    message: String,
    #[builder(into)]
    author_name: String,
    #[builder(into)]
    author_email: String,
    #[builder(into, default = String::from("gitops-repo-"))]
    clone_prefix: String,
    #[builder(into)]
    dest: Option<PathBuf>,
    #[builder(default)]
    sources: Vec<PathBuf>,
    #[builder(default = true)]
    push: bool,
    #[builder(default = false)]
    keep: bool,
}

impl PublishRequest {
    /// Build a request from CLI arguments, filling gaps from the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no author identity is available.
    pub fn from_args(args: &PublishArgs, config: &Config) -> Result<Self> {
        let mut author = config.author.clone();
        if let Some(name) = &args.author_name {
            author.name.clone_from(name);
        }
        if let Some(email) = &args.author_email {
            author.email.clone_from(email);
        }
        let (author_name, author_email) = author.identity()?;

        Ok(Self::builder()
            .locator(args.url.as_str())
            .branch(args.branch.as_deref().unwrap_or(&config.git.branch))
            .message(args.message.as_str())
            .author_name(author_name)
            .author_email(author_email)
            .clone_prefix(config.git.clone_prefix.as_str())
            .maybe_dest(args.dest.clone())
            .sources(args.sources.clone())
            .push(!args.no_push)
            .keep(args.keep)
            .build())
    }

    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    #[must_use]
    pub fn dest(&self) -> Option<&Path> {
        self.dest.as_deref()
    }

    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

/// Result of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Paths staged, relative to the working copy root.
    pub staged: Vec<String>,
    /// Whether `git push` ran.
    pub pushed: bool,
    /// The working copy, when it was kept.
    pub kept: Option<PathBuf>,
}

/// Run the publish command with a real git client.
///
/// # Errors
///
/// Returns an error if the request is invalid or any git step fails.
pub fn run_publish_command(args: &PublishArgs, config: &Config) -> Result<()> {
    let request = PublishRequest::from_args(args, config)?;
    let mut git = GitClient::from_config(&config.git);
    let outcome = publish(&mut git, &request)?;

    if outcome.pushed {
        println!("Published {} path(s) to {}", outcome.staged.len(), request.locator);
    } else {
        println!("Committed {} path(s), push skipped", outcome.staged.len());
    }
    if let Some(path) = outcome.kept {
        println!("Working copy kept at {}", path.display());
    }
    Ok(())
}

/// Clone, copy the sources in, commit and push.
///
/// The working copy is deleted afterwards unless the request keeps it,
/// including when a step after the clone fails.
///
/// # Errors
///
/// Returns `GitError::NotAGitUrl` for a locator that is not a git URL, an
/// error for an unsafe destination, or the first failing step.
pub fn publish<E: Executor>(git: &mut GitClient<E>, request: &PublishRequest) -> Result<PublishOutcome> {
    if !is_git_url(&request.locator) {
        return Err(GitError::NotAGitUrl {
            locator: request.locator.clone(),
        }
        .into());
    }
    if request.sources.is_empty() {
        bail!("nothing to publish");
    }
    if let Some(dest) = &request.dest {
        check_dest(dest)?;
    }

    let repo = repo_name(&request.locator)?;
    let prefix = format!("{}{repo}-", request.clone_prefix);
    let root = git.clone_repo(&prefix, &request.branch, &request.locator)?;

    let result = stage_commit_push(git, &root, request);

    let kept = if request.keep {
        Some(root)
    } else {
        if let Err(err) = git.delete_local_repo() {
            warn!(error = %err, "failed to delete working copy");
        }
        None
    };

    let (staged, pushed) = result?;
    Ok(PublishOutcome {
        staged,
        pushed,
        kept,
    })
}

fn stage_commit_push<E: Executor>(
    git: &mut GitClient<E>,
    root: &Path,
    request: &PublishRequest,
) -> Result<(Vec<String>, bool)> {
    let target = request
        .dest
        .as_ref()
        .map_or_else(|| root.to_path_buf(), |dest| root.join(dest));

    let mut staged = Vec::with_capacity(request.sources.len());
    for source in &request.sources {
        let copied = copy_into(source, &target)?;
        staged.push(relative_to(&copied, root)?);
    }
    info!(count = staged.len(), "copied sources into working copy");

    git.add(&staged)?;
    git.commit(&request.message, &request.author_name, &request.author_email)?;
    if request.push {
        git.push()?;
    }
    Ok((staged, request.push))
}

fn check_dest(dest: &Path) -> Result<()> {
    let escapes = dest
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        bail!(
            "destination {} must be a relative path inside the repository",
            dest.display()
        );
    }
    let metadata = dest.components().any(|c| match c {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| name.eq_ignore_ascii_case(".git")),
        _ => false,
    });
    if metadata {
        bail!("destination {} points into .git", dest.display());
    }
    Ok(())
}

fn relative_to(path: &Path, root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
    relative
        .to_str()
        .map(|s| s.replace('\\', "/"))
        .with_context(|| format!("{} is not valid UTF-8", relative.display()))
}
