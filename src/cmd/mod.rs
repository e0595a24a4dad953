// gitops-rs: Git Repository Client for GitOps Workflows
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config   options, sources
//!   locator  repo-name, check-url
//!   publish  clone --> copy --> add --> commit --> push --> delete
//! ```

pub mod config;
pub mod locator;
pub mod publish;
