// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for running external commands.
//!
//! ```text
//!              core
//!               |
//!            process
//!               |
//!     +---------+---------+
//!     |                   |
//!  ShellExecutor   RecordingExecutor
//!  (spawn, wait)   (record, script)
//! ```

pub mod process;
