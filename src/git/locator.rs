// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository locator classification and name extraction.
//!
//! ```text
//! scp-like          git@github.com:org/team/repo.git
//!                   user@host      :path
//! scheme-qualified  https://user@host:8080/org/team/repo.git
//!                   scheme://authority  /path
//!
//! repo_name --> last path segment, ".git" stripped --> "repo"
//! ```
//!
//! Pure functions. Nothing here touches the executor.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GitError, GitopsResult};

static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._~+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*:(?P<path>.+)$")
        .expect("scp-like locator regex is valid")
});

// The authority may itself contain colons (`user@secret:host.example.com:8080`).
static SCHEME_QUALIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z][A-Za-z0-9+.-]*://(?:[^@/]*@)?(?P<host>[^@/:\s][^@/\s]*)/(?P<path>.*)$",
    )
    .expect("scheme-qualified locator regex is valid")
});

/// Shape of a recognised repository locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorKind {
    /// `user@host:path`
    ScpLike,
    /// `scheme://[user@]host[:port]/path`
    SchemeQualified,
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScpLike => write!(f, "scp-like"),
            Self::SchemeQualified => write!(f, "scheme-qualified"),
        }
    }
}

/// Classify `candidate`, or `None` if it is not a git URL.
#[must_use]
pub fn classify(candidate: &str) -> Option<LocatorKind> {
    let candidate = candidate.trim();

    if let Some(caps) = SCHEME_QUALIFIED.captures(candidate) {
        return has_path(&caps["path"]).then_some(LocatorKind::SchemeQualified);
    }
    if candidate.contains("://") {
        return None;
    }
    SCP_LIKE
        .captures(candidate)
        .filter(|caps| has_path(&caps["path"]))
        .map(|_| LocatorKind::ScpLike)
}

/// Returns true if `candidate` is an scp-like or scheme-qualified git URL.
#[must_use]
pub fn is_git_url(candidate: &str) -> bool {
    classify(candidate).is_some()
}

/// Extract the repository name: the final path segment without `.git`.
///
/// Only the last segment matters, however deeply the repository is nested.
///
/// # Errors
///
/// Returns `GitError::InvalidLocator` if the locator has no path separator or
/// its final segment is empty.
pub fn repo_name(locator: &str) -> GitopsResult<String> {
    let invalid = || GitError::InvalidLocator {
        locator: locator.to_string(),
    };

    let trimmed = locator.trim();
    // Query and fragment are not part of the path.
    let trimmed = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or(trimmed)
        .trim_end_matches('/');
    let path = match trimmed.split_once("://") {
        // Only the part after the authority is a path.
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path),
        None if trimmed.contains('/') => Some(trimmed),
        None => trimmed.split_once(':').map(|(_, path)| path),
    }
    .ok_or_else(invalid)?;

    let segment = path.rsplit('/').next().unwrap_or(path);
    let name = segment.strip_suffix(".git").unwrap_or(segment);
    if name.is_empty() {
        return Err(invalid().into());
    }
    Ok(name.to_string())
}

fn has_path(path: &str) -> bool {
    !path.trim_matches('/').is_empty()
}
