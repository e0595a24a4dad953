// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git client owning at most one ephemeral working copy.
//!
//! ```text
//!                 clone_repo ok
//! Uninitialized ----------------> Cloned(WorkingCopy) --+
//!       ^                              |    add/commit/  |
//!       |      delete_local_repo       |    push         |
//!       +------------------------------+ <---------------+
//!
//! add/commit/push while Uninitialized --> GitError::NoWorkingCopy
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::types::GitConfig;
use crate::core::process::{CommandInvocation, Executor, ShellExecutor};
use crate::error::{FsError, GitError, GitopsResult};

/// Default name of the version-control program.
pub const DEFAULT_PROGRAM: &str = "git";

/// A checkout created by [`GitClient::clone_repo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy {
    path: PathBuf,
    locator: String,
    branch: String,
}

impl WorkingCopy {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, locator: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            locator: locator.into(),
            branch: branch.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// Lifecycle of a client's working copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkingCopyState {
    #[default]
    Uninitialized,
    Cloned(WorkingCopy),
}

/// Result of `git diff --cached --quiet`.
///
/// The command exits 0 when the index matches `HEAD` and 1 when it does not,
/// so a non-zero exit here is information, not failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedChanges {
    /// Nothing staged.
    Clean,
    /// Staged changes exist.
    Pending,
}

/// Sequences git commands against one working copy.
///
/// Mutating operations take `&mut self`; callers sharing one client must
/// serialise access themselves.
#[derive(Debug)]
pub struct GitClient<E> {
    executor: E,
    program: String,
    temp_root: PathBuf,
    state: WorkingCopyState,
}

impl GitClient<ShellExecutor> {
    /// Client running the configured git program through a [`ShellExecutor`].
    #[must_use]
    pub fn from_config(config: &GitConfig) -> Self {
        let executor = ShellExecutor::for_git().maybe_with_timeout(config.timeout());
        Self::new(executor, config.temp_root()).with_program(&config.program)
    }
}

impl<E: Executor> GitClient<E> {
    /// Create a client whose working copies live under `temp_root`.
    pub fn new(executor: E, temp_root: impl Into<PathBuf>) -> Self {
        Self {
            executor,
            program: DEFAULT_PROGRAM.to_string(),
            temp_root: temp_root.into(),
            state: WorkingCopyState::Uninitialized,
        }
    }

    /// Use `program` instead of `git`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    #[must_use]
    pub const fn state(&self) -> &WorkingCopyState {
        &self.state
    }

    /// The active working copy, if one is bound.
    #[must_use]
    pub const fn working_copy(&self) -> Option<&WorkingCopy> {
        match &self.state {
            WorkingCopyState::Cloned(copy) => Some(copy),
            WorkingCopyState::Uninitialized => None,
        }
    }

    /// Bind an existing checkout as the active working copy.
    ///
    /// The deletion guard still applies: a checkout outside the temp root can
    /// be worked on but never deleted by this client.
    pub fn adopt(&mut self, working_copy: WorkingCopy) {
        info!(path = %working_copy.path().display(), "adopting working copy");
        self.state = WorkingCopyState::Cloned(working_copy);
    }

    /// Unbind the active working copy without touching the disk.
    pub fn detach(&mut self) -> Option<WorkingCopy> {
        match std::mem::take(&mut self.state) {
            WorkingCopyState::Cloned(copy) => Some(copy),
            WorkingCopyState::Uninitialized => None,
        }
    }

    /// Clone `branch` of `locator` into a fresh directory under the temp root.
    ///
    /// The directory is named `<name_prefix><random>`. A previously bound
    /// working copy is deleted first. A failed clone removes the directory
    /// and leaves the client uninitialized.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidNamePrefix` if `name_prefix` contains a path
    /// separator or parent reference, or an error if the directory cannot be
    /// created or `git clone` fails.
    pub fn clone_repo(
        &mut self,
        name_prefix: &str,
        branch: &str,
        locator: &str,
    ) -> GitopsResult<PathBuf> {
        if name_prefix.contains(['/', '\\']) || name_prefix.contains("..") {
            return Err(GitError::InvalidNamePrefix {
                prefix: name_prefix.to_string(),
            }
            .into());
        }

        if self.working_copy().is_some() {
            debug!("releasing previous working copy before clone");
            self.delete_local_repo()?;
        }

        fs::create_dir_all(&self.temp_root).map_err(|source| io_error(&self.temp_root, source))?;
        let root = std::path::absolute(&self.temp_root)
            .map_err(|source| io_error(&self.temp_root, source))?;

        let dir = tempfile::Builder::new()
            .prefix(name_prefix)
            .tempdir_in(&root)
            .map_err(|source| io_error(&root, source))?;
        let dest = dir
            .path()
            .to_str()
            .ok_or_else(|| {
                io_error(
                    dir.path(),
                    std::io::Error::new(ErrorKind::InvalidData, "path is not valid UTF-8"),
                )
            })?
            .to_string();

        let invocation = CommandInvocation::new(
            self.program.as_str(),
            root.as_path(),
            ["clone", "-b", branch, locator, dest.as_str()],
        );
        if let Err(err) = self.executor.exec(&invocation) {
            if let Err(cleanup) = dir.close() {
                warn!(path = %dest, error = %cleanup, "failed to remove partial clone");
            }
            return Err(err);
        }

        let path = dir.keep();
        info!(path = %path.display(), branch, "cloned working copy");
        self.state = WorkingCopyState::Cloned(WorkingCopy::new(path.clone(), locator, branch));
        Ok(path)
    }

    /// Recursively delete the active working copy.
    ///
    /// Succeeds without doing anything when no working copy is bound or the
    /// directory is already gone.
    ///
    /// # Errors
    ///
    /// Returns `GitError::UnsafeDeletion` if the working copy is not strictly
    /// inside the temp root; the working copy stays bound in that case.
    pub fn delete_local_repo(&mut self) -> GitopsResult<()> {
        let Some(copy) = self.working_copy() else {
            debug!("no working copy to delete");
            return Ok(());
        };
        let path = copy.path().to_path_buf();

        if let Err(err) = ensure_within_root(&path, &self.temp_root) {
            warn!(path = %path.display(), root = %self.temp_root.display(), "refusing to delete working copy");
            return Err(err);
        }

        match fs::remove_dir_all(&path) {
            Ok(()) => info!(path = %path.display(), "deleted working copy"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "working copy already gone");
            }
            Err(source) => return Err(io_error(&path, source).into()),
        }

        self.state = WorkingCopyState::Uninitialized;
        Ok(())
    }

    /// Stage `paths` with `git add -- <paths>`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoWorkingCopy` before a clone, or the command failure.
    pub fn add<I, S>(&mut self, paths: I) -> GitopsResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dir = self.require("add")?;
        let mut args = vec!["add".to_string(), "--".to_string()];
        args.extend(paths.into_iter().map(|p| p.as_ref().to_string()));
        self.run(dir, args)
    }

    /// Commit staged changes as `author_name <author_email>`.
    ///
    /// Does nothing when nothing is staged. The identity is written to the
    /// working copy's config before committing, so no global git identity is
    /// needed. A failing step aborts the rest without undoing earlier steps.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoWorkingCopy` before a clone, an error if the diff
    /// check cannot run, or the first failing config/commit command.
    pub fn commit(
        &mut self,
        message: &str,
        author_name: &str,
        author_email: &str,
    ) -> GitopsResult<()> {
        let dir = self.require("commit")?;

        if self.staged_changes()? == StagedChanges::Clean {
            info!("no staged changes, skipping commit");
            return Ok(());
        }

        self.run(dir, ["config", "user.email", author_email])?;
        self.run(dir, ["config", "user.name", author_name])?;
        let author = format!("--author={author_name} <{author_email}>");
        self.run(dir, ["commit", "-m", message, author.as_str()])?;
        info!(author = author_name, "committed staged changes");
        Ok(())
    }

    /// Check the index for staged changes with `git diff --cached --quiet`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoWorkingCopy` before a clone, or an error if the
    /// command could not be run at all.
    pub fn staged_changes(&self) -> GitopsResult<StagedChanges> {
        let dir = self.require("check staged changes")?;
        match self.run(dir, ["diff", "--cached", "--quiet"]) {
            Ok(()) => Ok(StagedChanges::Clean),
            Err(err) if err.is_non_zero_exit() => Ok(StagedChanges::Pending),
            Err(err) => Err(err),
        }
    }

    /// Push the checked-out branch with `git push`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NoWorkingCopy` before a clone, or the command failure.
    pub fn push(&mut self) -> GitopsResult<()> {
        let dir = self.require("push")?;
        self.run(dir, ["push"])?;
        info!("pushed working copy");
        Ok(())
    }

    fn require(&self, operation: &'static str) -> GitopsResult<&Path> {
        self.working_copy()
            .map(WorkingCopy::path)
            .ok_or_else(|| GitError::NoWorkingCopy { operation }.into())
    }

    fn run<I, S>(&self, dir: &Path, args: I) -> GitopsResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.executor
            .exec(&CommandInvocation::new(self.program.as_str(), dir, args))
    }
}

/// Check that `path` lies strictly inside `root`.
///
/// Compared lexically after making both absolute and resolving `.`/`..`, then
/// again on canonical paths when `path` exists so symlinks cannot escape.
///
/// # Errors
///
/// Returns `GitError::UnsafeDeletion` if `path` is outside `root` or equal to it.
pub fn ensure_within_root(path: &Path, root: &Path) -> GitopsResult<()> {
    let unsafe_deletion = || GitError::UnsafeDeletion {
        path: path.display().to_string(),
        root: root.display().to_string(),
    };

    let abs_path = normalize(&std::path::absolute(path).map_err(|source| io_error(path, source))?);
    let abs_root = normalize(&std::path::absolute(root).map_err(|source| io_error(root, source))?);
    if !is_strictly_inside(&abs_path, &abs_root) {
        return Err(unsafe_deletion().into());
    }

    if abs_path.exists() {
        let real_path = abs_path
            .canonicalize()
            .map_err(|source| io_error(&abs_path, source))?;
        let real_root = abs_root.canonicalize().map_err(|_| unsafe_deletion())?;
        if !is_strictly_inside(&real_path, &real_root) {
            return Err(unsafe_deletion().into());
        }
    }
    Ok(())
}

fn is_strictly_inside(path: &Path, root: &Path) -> bool {
    path != root && path.starts_with(root)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn io_error(path: &Path, source: std::io::Error) -> FsError {
    FsError::IoError {
        path: path.display().to_string(),
        source,
    }
}
