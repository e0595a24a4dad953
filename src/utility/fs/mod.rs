// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem helpers for filling a working copy.
//!
//! ```text
//! copy:  copy_into()          file or directory --> dst/<file name>
//!        copy_dir_contents()  recursive directory copy
//! ```

pub mod copy;

#[cfg(test)]
mod tests;
