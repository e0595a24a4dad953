// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!            Public API
//!     client.rs        locator.rs
//!   clone/add/commit   repo_name
//!   push/delete        is_git_url
//!         |            (pure, no I/O)
//!         v
//!  ,-------------------,
//!  | Executor (trait)  |
//!  '---+-----------+---'
//!      |           |
//!      v           v
//!  ShellExecutor  RecordingExecutor
//!   (git CLI)      (tests)
//! ```

pub mod client;
pub mod locator;

pub use client::{GitClient, StagedChanges, WorkingCopy, WorkingCopyState};
pub use locator::{LocatorKind, classify, is_git_url, repo_name};
